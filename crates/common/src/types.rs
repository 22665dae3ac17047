//! 通用类型定义

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// 分页参数
///
/// `page` 从 1 开始。取值的合法性（>= 1）由 API 层校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// 缺省字段使用默认值
    pub fn from_optional(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// `ceil(count / limit)`，limit 为 0 时返回 0
    pub fn last_page(&self, count: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        count.div_ceil(u64::from(self.limit))
    }
}

/// 分页元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub count: u64,
    pub page: u32,
    #[serde(rename = "lastpage")]
    pub last_page: u64,
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total: PageMeta,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, count: u64, pagination: &Pagination) -> Self {
        Self {
            data,
            total: PageMeta {
                count,
                page: pagination.page,
                last_page: pagination.last_page(count),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::from_optional(None, None);
        assert_eq!(p, Pagination::new(1, 10));
        assert_eq!(p, Pagination::default());
        assert_eq!(Pagination::from_optional(Some(3), None), Pagination::new(3, 10));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
        assert_eq!(Pagination::new(0, 10).offset(), 0);
    }

    #[test]
    fn test_last_page_rounds_up() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.last_page(0), 0);
        assert_eq!(p.last_page(1), 1);
        assert_eq!(p.last_page(10), 1);
        assert_eq!(p.last_page(11), 2);
        assert_eq!(Pagination::new(1, 3).last_page(7), 3);
    }

    #[test]
    fn test_last_page_zero_limit() {
        assert_eq!(Pagination::new(1, 0).last_page(42), 0);
    }

    #[test]
    fn test_paged_result_keeps_requested_page() {
        let p = Pagination::new(5, 2);
        let result: PagedResult<i32> = PagedResult::new(vec![], 3, &p);
        assert!(result.data.is_empty());
        assert_eq!(result.total.count, 3);
        assert_eq!(result.total.page, 5);
        assert_eq!(result.total.last_page, 2);
    }

    #[test]
    fn test_page_meta_wire_name() {
        let meta = PageMeta {
            count: 1,
            page: 1,
            last_page: 1,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["lastpage"], 1);
    }
}
