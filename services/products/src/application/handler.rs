//! Business logic handler

use std::collections::BTreeSet;
use std::sync::Arc;

use catalog_common::{PagedResult, Pagination};
use catalog_errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::domain::{NewProduct, Product, ProductId, ProductPatch, ProductRepository};

pub struct ProductHandler {
    repo: Arc<dyn ProductRepository>,
}

impl ProductHandler {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建商品
    pub async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let created = self.repo.insert(&product).await?;
        info!(product_id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// 分页列出可用商品
    ///
    /// 页码超出范围时返回空数据，统计信息不变。
    pub async fn find_all(&self, pagination: Pagination) -> AppResult<PagedResult<Product>> {
        let count = self.repo.count_active().await?;
        let data = self.repo.list_active(&pagination).await?;

        info!(
            page = pagination.page,
            limit = pagination.limit,
            count,
            returned = data.len(),
            "Listed products"
        );
        Ok(PagedResult::new(data, count, &pagination))
    }

    /// 获取可用商品
    pub async fn find_one(&self, id: ProductId) -> AppResult<Product> {
        self.repo
            .find_active(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// 更新可用商品，未提供的字段保持不变
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> AppResult<Product> {
        let updated = self
            .repo
            .update_active(id, &patch)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    /// 软删除
    pub async fn remove(&self, id: ProductId) -> AppResult<Product> {
        let removed = self
            .repo
            .deactivate(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(product_id = %id, "Product marked unavailable");
        Ok(removed)
    }

    /// 硬删除，不可恢复
    pub async fn logic_remove(&self, id: ProductId) -> AppResult<Product> {
        let deleted = self
            .repo
            .delete_active(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(product_id = %id, "Product deleted");
        Ok(deleted)
    }

    /// 校验一组商品 ID 全部存在
    ///
    /// 重复 ID 只计一次。已下架的商品同样视为存在，供其它服务做外键式校验。
    pub async fn validate_products(&self, ids: Vec<ProductId>) -> AppResult<Vec<Product>> {
        let distinct: Vec<ProductId> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let products = self.repo.find_by_ids(&distinct).await?;

        if products.len() != distinct.len() {
            let found: BTreeSet<ProductId> = products.iter().map(|p| p.id).collect();
            let missing: Vec<String> = distinct
                .iter()
                .filter(|id| !found.contains(id))
                .map(ToString::to_string)
                .collect();
            warn!(missing = ?missing, "Product validation failed");
            return Err(AppError::validation(format!(
                "Some products were not found: [{}]",
                missing.join(", ")
            )));
        }

        Ok(products)
    }
}

fn not_found(id: ProductId) -> AppError {
    warn!(product_id = %id, "Product not found");
    AppError::not_found(format!("Product with id {} not found", id))
}
