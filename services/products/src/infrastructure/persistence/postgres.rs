//! PostgreSQL repository implementation

use async_trait::async_trait;
use catalog_common::Pagination;
use catalog_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::{NewProduct, Product, ProductId, ProductPatch, ProductRepository};

use super::rows::ProductRow;

const PRODUCT_COLUMNS: &str = "id, name, price, available, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::database(format!("{}: {}", action, e))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {}",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to insert product"))?;

        Ok(row.into())
    }

    async fn count_active(&self) -> AppResult<u64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE available = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count products"))?;

        Ok(count.max(0) as u64)
    }

    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM products
            WHERE available = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(i64::from(pagination.limit))
            .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list products"))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_active(&self, id: ProductId) -> AppResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE id = $1 AND available = TRUE",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to query product"))?;

        Ok(row.map(Product::from))
    }

    async fn update_active(&self, id: ProductId, patch: &ProductPatch) -> AppResult<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.0)
            .bind(patch.name.as_deref())
            .bind(patch.price)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to update product"))?;

        Ok(row.map(Product::from))
    }

    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products SET available = FALSE, updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to deactivate product"))?;

        Ok(row.map(Product::from))
    }

    async fn delete_active(&self, id: ProductId) -> AppResult<Option<Product>> {
        let sql = format!(
            "DELETE FROM products WHERE id = $1 AND available = TRUE RETURNING {}",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to delete product"))?;

        Ok(row.map(Product::from))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM products WHERE id = ANY($1) ORDER BY id",
            PRODUCT_COLUMNS
        );
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(raw_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to query products by ids"))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
