//! catalog-errors - 统一错误处理

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 是否属于调用方错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_client_error() {
        let err = AppError::not_found("Product with id 7 not found");
        assert!(err.is_client_error());
        assert_eq!(err.grpc_code(), tonic::Code::NotFound);
    }

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let err = AppError::validation("Some products were not found: [99]");
        assert!(err.is_client_error());
        assert_eq!(err.grpc_code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_server_errors() {
        let err = AppError::database("connection reset");
        assert!(!err.is_client_error());
        assert_eq!(err.grpc_code(), tonic::Code::Internal);

        assert!(!AppError::internal("recorder").is_client_error());
    }

    #[test]
    fn test_status_conversion_keeps_message() {
        let status: tonic::Status = AppError::not_found("Product with id 3 not found").into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "Not found: Product with id 3 not found");
    }
}
