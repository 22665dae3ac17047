//! 测试辅助：内存仓储实现

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_common::Pagination;
use catalog_errors::AppResult;
use chrono::Utc;

use catalog_products::application::ProductHandler;
use catalog_products::domain::{NewProduct, Product, ProductId, ProductPatch, ProductRepository};

/// 行为与 PostgreSQL 实现一致：自增 ID、按 ID 排序、只操作可用商品
#[derive(Default)]
pub struct InMemoryProductRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i32,
    rows: BTreeMap<ProductId, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接读取行（包括已下架的）
    pub fn row(&self, id: ProductId) -> Option<Product> {
        self.state.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let created = Product {
            id: ProductId(state.next_id),
            name: product.name.clone(),
            price: product.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn count_active(&self) -> AppResult<u64> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.values().filter(|p| p.available).count() as u64)
    }

    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .values()
            .filter(|p| p.available)
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_active(&self, id: ProductId) -> AppResult<Option<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.get(&id).filter(|p| p.available).cloned())
    }

    async fn update_active(&self, id: ProductId, patch: &ProductPatch) -> AppResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.rows.get_mut(&id).filter(|p| p.available).map(|p| {
            if let Some(name) = &patch.name {
                p.name = name.clone();
            }
            if let Some(price) = patch.price {
                p.price = price;
            }
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.rows.get_mut(&id).filter(|p| p.available).map(|p| {
            p.available = false;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_active(&self, id: ProductId) -> AppResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        if state.rows.get(&id).is_some_and(|p| p.available) {
            return Ok(state.rows.remove(&id));
        }
        Ok(None)
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

pub fn setup() -> (Arc<InMemoryProductRepository>, ProductHandler) {
    let repo = Arc::new(InMemoryProductRepository::new());
    let handler = ProductHandler::new(repo.clone());
    (repo, handler)
}

pub fn new_product(name: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
    }
}
