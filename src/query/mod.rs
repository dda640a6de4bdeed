//! Translation of list query parameters into a store-agnostic filter and a
//! result window.

pub mod filter;
pub mod pagination;

pub use filter::{list_filter, Condition, Filter};
pub use pagination::{Page, PageRequest, Pagination};

/// Value of `key` in raw query-string pairs; a repeated key keeps its first value.
pub fn first_param(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// A filtered, newest-first window over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Filter,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn new(filter: Filter, page: PageRequest) -> Self {
        Self { filter, page }
    }

    pub fn skip(&self) -> u64 {
        self.page.skip()
    }

    pub fn limit(&self) -> u64 {
        self.page.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param_keeps_first_occurrence() {
        let pairs = vec![
            ("page".to_string(), "1".to_string()),
            ("search".to_string(), "".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        assert_eq!(first_param(&pairs, "page").as_deref(), Some("1"));
        assert_eq!(first_param(&pairs, "search").as_deref(), Some(""));
        assert_eq!(first_param(&pairs, "limit"), None);
    }
}
