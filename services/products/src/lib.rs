//! catalog-products - 商品目录服务

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub mod proto {
    tonic::include_proto!("catalog.products.v1");
}

pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("catalog_products_descriptor");
