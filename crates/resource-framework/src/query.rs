//! Query parameters for collection requests.

use serde::{Deserialize, Serialize};

/// Name of the throwaway parameter that defeats intermediate HTTP caches.
pub const CACHE_BUSTER: &str = "cacheBuster";

/// Optional pagination and sort applied to a `list` request.
///
/// `sort` is passed through verbatim, e.g. `"id,asc"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl QueryParams {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: None,
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Query pairs for a list request issued at `now_millis`.
    ///
    /// The cache buster always comes first, followed by whichever of
    /// `page`, `size` and `sort` are set.
    pub fn to_pairs(&self, now_millis: i64) -> Vec<(String, String)> {
        let mut pairs = vec![(CACHE_BUSTER.to_string(), now_millis.to_string())];
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_only_busts_cache() {
        let pairs = QueryParams::default().to_pairs(1_700_000_000_000);
        assert_eq!(
            pairs,
            vec![("cacheBuster".to_string(), "1700000000000".to_string())]
        );
    }

    #[test]
    fn pagination_and_sort_follow_cache_buster() {
        let pairs = QueryParams::page(0, 20).sorted_by("id,asc").to_pairs(5);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["cacheBuster", "page", "size", "sort"]);
        assert_eq!(pairs[1].1, "0");
        assert_eq!(pairs[2].1, "20");
        assert_eq!(pairs[3].1, "id,asc");
    }
}
