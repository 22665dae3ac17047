//! 基础设施资源管理

use std::time::Duration;

use catalog_adapter_postgres::{
    Migration, MigrationManager, MigrationResult, PoolStatus, PostgresConfig, check_connection,
    create_pool,
};
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 连接池在启动时创建一次，之后在服务生命周期内共享。
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        Self::from_config_with_retry(config, &RetryConfig::default()).await
    }

    pub async fn from_config_with_retry(
        config: AppConfig,
        retry_config: &RetryConfig,
    ) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_min_connections(config.database.min_connections)
            .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));

        let postgres_pool = with_retry(retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self::from_parts(config, postgres_pool))
    }

    /// 使用已有连接池组装
    pub fn from_parts(config: AppConfig, postgres_pool: PgPool) -> Self {
        Self {
            config,
            postgres_pool,
        }
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn postgres_pool_status(&self) -> PoolStatus {
        PoolStatus::of(&self.postgres_pool)
    }

    pub async fn check_postgres(&self) -> AppResult<()> {
        check_connection(&self.postgres_pool).await
    }

    /// 按配置执行服务迁移
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        if !self.config.database.run_migrations {
            info!("Migrations disabled by configuration, skipping");
            return Ok(());
        }

        let result: MigrationResult = MigrationManager::new(self.postgres_pool())
            .migrate(migrations)
            .await?
            .into_result()?;

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Database migrations complete"
        );
        Ok(())
    }
}
