//! API layer - gRPC service implementations

mod conversions;
mod grpc_service;

pub use conversions::*;
pub use grpc_service::ProductServiceImpl;
