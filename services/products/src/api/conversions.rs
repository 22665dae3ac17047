//! Proto <-> Domain conversions
//!
//! 请求参数在这里完成校验，应用层只接收合法的输入。
//! 商品 ID 原样传递：不存在的 ID（包括非正数）由应用层报告为未找到。

use catalog_common::{PagedResult, Pagination};
use catalog_errors::{AppError, AppResult};

use crate::domain::{NewProduct, Product, ProductId, ProductPatch};
use crate::proto;

/// 与 `products.name` 列的 VARCHAR(255) 一致，按字符计
pub const MAX_NAME_LEN: usize = 255;

fn parse_positive(value: Option<i32>, field: &str) -> AppResult<Option<u32>> {
    match value {
        None => Ok(None),
        Some(v) if v >= 1 => Ok(Some(v as u32)),
        Some(v) => Err(AppError::validation(format!(
            "{} must be a positive integer, got {}",
            field, v
        ))),
    }
}

/// 解析分页参数，缺省为 page = 1, limit = 10
pub fn parse_pagination(page: Option<i32>, limit: Option<i32>) -> AppResult<Pagination> {
    Ok(Pagination::from_optional(
        parse_positive(page, "page")?,
        parse_positive(limit, "limit")?,
    ))
}

/// 名称不能为空白，存储时保持原样
fn validate_name(name: String) -> AppResult<String> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name)
}

fn validate_price(price: f64) -> AppResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(price)
}

pub fn new_product_from_proto(req: proto::CreateProductRequest) -> AppResult<NewProduct> {
    Ok(NewProduct {
        name: validate_name(req.name)?,
        price: validate_price(req.price)?,
    })
}

/// 路径上的 `id` 为准，请求体中的 `body_id` 直接丢弃
pub fn update_from_proto(req: proto::UpdateProductRequest) -> AppResult<(ProductId, ProductPatch)> {
    let patch = ProductPatch {
        name: req.name.map(validate_name).transpose()?,
        price: req.price.map(validate_price).transpose()?,
    };
    Ok((ProductId(req.id), patch))
}

pub fn product_ids_from_proto(ids: Vec<i32>) -> Vec<ProductId> {
    ids.into_iter().map(ProductId::from).collect()
}

pub fn product_to_proto(product: Product) -> proto::Product {
    proto::Product {
        id: product.id.0,
        name: product.name,
        price: product.price,
        available: product.available,
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    }
}

pub fn product_response(product: Product) -> proto::ProductResponse {
    proto::ProductResponse {
        product: Some(product_to_proto(product)),
    }
}

pub fn page_to_proto(page: PagedResult<Product>) -> proto::FindAllProductsResponse {
    let total = proto::PageTotal {
        count: i64::try_from(page.total.count).unwrap_or(i64::MAX),
        page: i32::try_from(page.total.page).unwrap_or(i32::MAX),
        last_page: i64::try_from(page.total.last_page).unwrap_or(i64::MAX),
    };
    proto::FindAllProductsResponse {
        data: page.data.into_iter().map(product_to_proto).collect(),
        total: Some(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_product() -> Product {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        Product {
            id: ProductId(1),
            name: "Widget".to_string(),
            price: 10.0,
            available: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_parse_pagination_defaults() {
        assert_eq!(parse_pagination(None, None).unwrap(), Pagination::new(1, 10));
        assert_eq!(parse_pagination(Some(2), None).unwrap(), Pagination::new(2, 10));
        assert_eq!(parse_pagination(None, Some(50)).unwrap(), Pagination::new(1, 50));
    }

    #[test]
    fn test_parse_pagination_rejects_non_positive() {
        assert!(matches!(
            parse_pagination(Some(0), None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_pagination(None, Some(-1)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_validation() {
        let product = new_product_from_proto(proto::CreateProductRequest {
            name: "  Widget ".to_string(),
            price: 10.0,
        })
        .unwrap();
        assert_eq!(product.name, "  Widget ");

        assert!(
            new_product_from_proto(proto::CreateProductRequest {
                name: "   ".to_string(),
                price: 1.0,
            })
            .is_err()
        );
        assert!(
            new_product_from_proto(proto::CreateProductRequest {
                name: "Widget".to_string(),
                price: -0.5,
            })
            .is_err()
        );
        assert!(
            new_product_from_proto(proto::CreateProductRequest {
                name: "Widget".to_string(),
                price: f64::NAN,
            })
            .is_err()
        );
    }

    #[test]
    fn test_name_length_limit() {
        let at_limit = "é".repeat(MAX_NAME_LEN);
        let product = new_product_from_proto(proto::CreateProductRequest {
            name: at_limit.clone(),
            price: 1.0,
        })
        .unwrap();
        assert_eq!(product.name, at_limit);

        let result = new_product_from_proto(proto::CreateProductRequest {
            name: "x".repeat(MAX_NAME_LEN + 1),
            price: 1.0,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = update_from_proto(proto::UpdateProductRequest {
            id: 1,
            name: Some("x".repeat(MAX_NAME_LEN + 1)),
            price: None,
            body_id: None,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_ignores_body_id() {
        let (id, patch) = update_from_proto(proto::UpdateProductRequest {
            id: 1,
            name: Some("X".to_string()),
            price: None,
            body_id: Some(99),
        })
        .unwrap();

        assert_eq!(id, ProductId(1));
        assert_eq!(patch.name.as_deref(), Some("X"));
        assert_eq!(patch.price, None);
    }

    #[test]
    fn test_update_validates_present_fields() {
        let result = update_from_proto(proto::UpdateProductRequest {
            id: 1,
            name: Some(String::new()),
            price: None,
            body_id: None,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_ids_pass_through_unchanged() {
        assert_eq!(
            product_ids_from_proto(vec![1, 1, 0]),
            vec![ProductId(1), ProductId(1), ProductId(0)]
        );
        assert!(product_ids_from_proto(vec![]).is_empty());

        let (id, _) = update_from_proto(proto::UpdateProductRequest {
            id: -4,
            name: None,
            price: None,
            body_id: None,
        })
        .unwrap();
        assert_eq!(id, ProductId(-4));
    }

    #[test]
    fn test_product_to_proto() {
        let proto = product_to_proto(sample_product());
        assert_eq!(proto.id, 1);
        assert_eq!(proto.name, "Widget");
        assert!(proto.available);
        assert_eq!(proto.created_at, "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn test_page_to_proto() {
        let page = PagedResult::new(vec![sample_product()], 11, &Pagination::new(1, 10));
        let response = page_to_proto(page);
        assert_eq!(response.data.len(), 1);

        let total = response.total.unwrap();
        assert_eq!(total.count, 11);
        assert_eq!(total.page, 1);
        assert_eq!(total.last_page, 2);
    }
}
