//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use catalog_config::AppConfig;
use catalog_errors::AppResult;
use tonic::transport::Server;
use tokio::task::JoinHandle;
use tonic::transport::server::Router;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::recorder::{MetricsRecorder, PoolMetricsCollector};
use crate::runtime::{init_runtime, shutdown_signal};
use crate::shutdown::ShutdownController;

const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(15);

/// 运行 gRPC 服务
///
/// 所有服务的统一入口点：
/// 1. 加载配置并初始化日志
/// 2. 创建基础设施（数据库连接池，带重试）
/// 3. 启动健康检查 HTTP 服务器和连接池 metrics 采集
/// 4. 调用 `router_builder` 注册 gRPC 服务
/// 5. 启动服务器，收到 Ctrl+C / SIGTERM 后优雅关闭
///
/// # 示例
///
/// ```ignore
/// run_server("config", |infra, mut server| async move {
///     let service = MyServiceImpl::new(infra.postgres_pool());
///     Ok(server.add_service(MyServiceServer::new(service)))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Arc<Infrastructure>, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = Arc::new(MetricsRecorder::install()?);
    let health_port = config.server.health_port();
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let infra = Arc::new(Infrastructure::from_config(config).await?);

    let pool_metrics = PoolMetricsCollector::new(infra.clone(), POOL_METRICS_INTERVAL).start();

    let shutdown = ShutdownController::new();
    let signal_handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown.shutdown();
        })
    };

    let health_server = HealthServer::new(
        Arc::new(HealthChecker::new(infra.clone())),
        metrics,
        health_port,
    );
    let health_shutdown = shutdown.wait();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve(health_shutdown).await {
            error!("Health server error: {}", e);
        }
    });

    let tasks = BackgroundTasks {
        shutdown,
        signal: signal_handle,
        pool_metrics,
        health: health_handle,
    };

    let router = match router_builder(infra, Server::builder()).await {
        Ok(router) => router,
        Err(e) => {
            error!("Failed to build gRPC router: {}", e);
            tasks.stop().await;
            return Err(e.into());
        }
    };

    info!(%addr, "gRPC server starting");
    let served = router
        .serve_with_shutdown(addr, tasks.shutdown.wait())
        .await;

    // gRPC 服务器异常退出时也要停掉其它任务
    tasks.stop().await;

    served?;
    info!("Service stopped");

    Ok(())
}

/// 与 gRPC 服务器并行运行的后台任务
struct BackgroundTasks {
    shutdown: ShutdownController,
    signal: JoinHandle<()>,
    pool_metrics: JoinHandle<()>,
    health: JoinHandle<()>,
}

impl BackgroundTasks {
    /// 触发关闭，等待健康检查服务器退出
    async fn stop(self) {
        self.shutdown.shutdown();
        self.signal.abort();
        self.pool_metrics.abort();
        if let Err(e) = self.health.await {
            error!("Health server task failed: {}", e);
        }
    }
}
