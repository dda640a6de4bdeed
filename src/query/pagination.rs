use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Leading-integer parse: optional sign followed by digits, trailing text ignored.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(parse_leading_int)
        .filter(|n| *n > 0)
        .map(|n| n as u64)
        .unwrap_or(default)
}

/// Requested result window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Falls back to page 1 / limit 10 for anything missing, non-numeric or non-positive.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(request.limit);
        Self {
            current_page: request.page,
            total_pages,
            total_count,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}

/// One window of results plus the metadata describing it.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(request, total_count),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        assert_eq!(PageRequest::from_params(None, None), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_non_numeric_and_non_positive_fall_back() {
        assert_eq!(PageRequest::from_params(Some("abc"), Some("0")), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::from_params(Some("-3"), Some("")), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_integer_prefix_is_used() {
        assert_eq!(PageRequest::from_params(Some("3abc"), Some("25.7")), PageRequest { page: 3, limit: 25 });
        assert_eq!(PageRequest::from_params(Some(" 2"), Some("+5")), PageRequest { page: 2, limit: 5 });
    }

    #[test]
    fn test_skip_offset() {
        assert_eq!(PageRequest::new(1, 10).skip(), 0);
        assert_eq!(PageRequest::new(3, 20).skip(), 40);
    }

    #[test]
    fn test_second_page_of_fifteen() {
        let p = Pagination::new(PageRequest::new(2, 10), 15);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.total_count, 15);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let p = Pagination::new(PageRequest::default(), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageRequest::new(1, 10), 11)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentPage": 1,
                "totalPages": 2,
                "totalCount": 11,
                "hasNextPage": true,
                "hasPrevPage": false
            })
        );
    }
}
