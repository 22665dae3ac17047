//! Domain layer

pub mod product;
pub mod repository;

pub use product::{NewProduct, Product, ProductId, ProductPatch};
pub use repository::ProductRepository;
