//! 商品仓储接口

use async_trait::async_trait;
use catalog_common::Pagination;
use catalog_errors::AppResult;

use super::product::{NewProduct, Product, ProductId, ProductPatch};

/// 商品仓储接口
///
/// 除 `find_by_ids` 外，所有读写都只作用于 `available = true` 的商品。
/// 修改类方法以单条条件语句完成，返回 `None` 表示没有匹配的可用商品。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 插入商品，返回含 ID 的完整记录
    async fn insert(&self, product: &NewProduct) -> AppResult<Product>;

    /// 可用商品总数
    async fn count_active(&self) -> AppResult<u64>;

    /// 按 ID 升序分页列出可用商品
    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>>;

    async fn find_active(&self, id: ProductId) -> AppResult<Option<Product>>;

    async fn update_active(&self, id: ProductId, patch: &ProductPatch) -> AppResult<Option<Product>>;

    /// 软删除：available 置为 false
    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 硬删除，返回被删除的记录
    async fn delete_active(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 按 ID 批量查询（包括已下架商品），按 ID 升序
    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>>;
}
