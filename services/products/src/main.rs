//! catalog-products Service - Product Catalog

use std::sync::Arc;

use catalog_bootstrap::{build_reflection, run_server};
use catalog_errors::AppError;
use tracing::info;

use catalog_products::FILE_DESCRIPTOR_SET;
use catalog_products::api::ProductServiceImpl;
use catalog_products::application::ProductHandler;
use catalog_products::infrastructure::migrations::migrations;
use catalog_products::infrastructure::persistence::PostgresProductRepository;
use catalog_products::proto::product_service_server::ProductServiceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    run_server(&config_dir, |infra, mut server| async move {
        info!("Initializing catalog-products service...");

        infra.run_migrations(&migrations()).await?;

        let repo = Arc::new(PostgresProductRepository::new(infra.postgres_pool()));
        let handler = Arc::new(ProductHandler::new(repo));
        let service = ProductServiceImpl::new(handler);

        let reflection_service = build_reflection(&[FILE_DESCRIPTOR_SET])
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        Ok::<_, AppError>(
            server
                .add_service(ProductServiceServer::new(service))
                .add_service(reflection_service),
        )
    })
    .await
}
