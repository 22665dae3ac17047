//! catalog-bootstrap - 统一服务启动骨架
//!
//! 配置 → 日志 → 基础设施 → 健康检查/metrics → gRPC 服务

mod health;
mod infrastructure;
mod recorder;
mod reflection;
mod retry;
mod runtime;
mod shutdown;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use recorder::*;
pub use reflection::*;
pub use retry::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
