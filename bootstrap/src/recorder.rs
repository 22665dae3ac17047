//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog_adapter_postgres::PoolStatus;
use catalog_errors::{AppError, AppResult};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder，每个进程只能调用一次
    pub fn install() -> AppResult<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

        Ok(Self { handle })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 gRPC 请求
pub fn record_grpc_request(service: &str, method: &str, status: &str, duration_ms: f64) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_ms", &labels).record(duration_ms);
}

/// 请求计时器
pub struct RequestTimer {
    start: Instant,
    service: &'static str,
    method: &'static str,
}

impl RequestTimer {
    pub fn new(service: &'static str, method: &'static str) -> Self {
        Self {
            start: Instant::now(),
            service,
            method,
        }
    }

    pub fn finish(self, status: tonic::Code) {
        let duration = self.start.elapsed().as_secs_f64() * 1000.0;
        record_grpc_request(self.service, self.method, &format!("{:?}", status), duration);
    }

    /// 按结果记录并原样返回
    pub fn observe<T>(self, result: Result<T, tonic::Status>) -> Result<T, tonic::Status> {
        let code = match &result {
            Ok(_) => tonic::Code::Ok,
            Err(status) => status.code(),
        };
        self.finish(code);
        result
    }
}

/// 记录 PostgreSQL 连接池指标
pub fn record_postgres_pool_metrics(status: &PoolStatus) {
    let labels = [("pool", "postgres".to_string())];
    gauge!("postgres_pool_size", &labels).set(f64::from(status.size));
    gauge!("postgres_pool_idle", &labels).set(f64::from(status.idle));
    gauge!("postgres_pool_active", &labels).set(f64::from(status.active));
    gauge!("postgres_pool_utilization", &labels).set(status.utilization());
}

/// 连接池 Metrics 采集器
pub struct PoolMetricsCollector {
    infra: Arc<Infrastructure>,
    interval: Duration,
}

impl PoolMetricsCollector {
    pub fn new(infra: Arc<Infrastructure>, interval: Duration) -> Self {
        Self { infra, interval }
    }

    /// 启动后台采集任务
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;

                let status = self.infra.postgres_pool_status();
                record_postgres_pool_metrics(&status);

                debug!(
                    postgres_size = status.size,
                    postgres_idle = status.idle,
                    postgres_active = status.active,
                    "Pool metrics collected"
                );
            }
        })
    }
}
