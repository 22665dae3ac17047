//! 内置数据库迁移

use catalog_adapter_postgres::Migration;

/// 本服务的全部迁移，版本号与 `migrations/` 目录下的文件前缀一致
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "create_products",
        include_str!("../../migrations/0001_create_products.sql"),
    )]
}
