//! 数据库行映射结构

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::{Product, ProductId};

/// 商品数据库行
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            name: row.name,
            price: row.price,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
