//! Client-style list views: free-text search, categorical filters, single-field
//! stable sort and page slicing over an in-memory collection.
//!
//! Every list endpoint funnels its `?search=..&status=..&sort_by=..` query
//! through `ListQuery::from_params` and `apply`.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Filter value that disables a categorical filter.
pub const MATCH_ALL: &str = "all";

const RESERVED_PARAMS: &[&str] = &["search", "q", "sort_by", "order", "page", "page_size"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A comparable projection of one field. Each field always yields the same
/// variant; `Missing` sorts before any value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortKey {
    Missing,
    Number(f64),
    Date(NaiveDate),
    Time(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        SortKey::Number(value.into())
    }

    pub fn optional<T>(value: Option<T>, project: impl FnOnce(T) -> SortKey) -> Self {
        value.map(project).unwrap_or(SortKey::Missing)
    }
}

/// Implemented by every row type shown in a list view.
pub trait Listable {
    /// Fields matched case-insensitively against the search string.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a categorical field, or `None` when `field` is not filterable.
    fn filter_value(&self, field: &str) -> Option<String>;

    /// Sort projection of `field`, or `None` when `field` is not sortable.
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    /// Builds a query from raw query-string pairs. Any key that is not a
    /// reserved parameter becomes a categorical filter.
    pub fn from_params(params: &HashMap<String, String>, config: &Config) -> Self {
        let search = params
            .get("search")
            .or_else(|| params.get("q"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let order = match params.get("order").map(|o| o.to_lowercase()) {
            Some(o) if o == "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        let page = params
            .get("page")
            .and_then(|p| p.parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        let page_size = params
            .get("page_size")
            .and_then(|p| p.parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        let mut filters: Vec<(String, String)> = params
            .iter()
            .filter(|(k, _)| !RESERVED_PARAMS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        filters.sort();

        ListQuery {
            search,
            filters,
            sort_by: params.get("sort_by").cloned().filter(|s| !s.is_empty()),
            order,
            page,
            page_size,
        }
    }

    /// Adds a filter unless the caller already supplied one for `field`.
    pub fn with_default_filter(mut self, field: &str, value: &str) -> Self {
        if !self.filters.iter().any(|(k, _)| k == field) {
            self.filters.push((field.to_string(), value.to_string()));
        }
        self
    }

    /// Forces a filter, overriding any caller-supplied value.
    pub fn with_filter(mut self, field: &str, value: &str) -> Self {
        self.filters.retain(|(k, _)| k != field);
        self.filters.push((field.to_string(), value.to_string()));
        self
    }

    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_filters(item)
    }

    fn matches_search<T: Listable>(&self, item: &T) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_filters<T: Listable>(&self, item: &T) -> bool {
        self.filters.iter().all(|(field, wanted)| {
            if wanted.eq_ignore_ascii_case(MATCH_ALL) {
                return true;
            }
            item.filter_value(field)
                .map(|actual| actual.eq_ignore_ascii_case(wanted))
                .unwrap_or(false)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Filters, sorts and paginates `items` according to `query`.
pub fn apply<T: Listable>(items: Vec<T>, query: &ListQuery) -> Page<T> {
    let mut rows: Vec<T> = items.into_iter().filter(|i| query.matches(i)).collect();

    if let Some(field) = &query.sort_by {
        // sort_by is stable: ties keep their relative order in both directions
        rows.sort_by(|a, b| {
            let ordering = compare_keys(a.sort_key(field), b.sort_key(field));
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let total = rows.len();
    let page_size = query.page_size.max(1);
    let total_pages = total.div_ceil(page_size);
    let start = (query.page.max(1) - 1).saturating_mul(page_size);

    let items = rows.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        total,
        page: query.page.max(1),
        page_size,
        total_pages,
    }
}

fn compare_keys(a: Option<SortKey>, b: Option<SortKey>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        city: &'static str,
        kind: &'static str,
        score: Option<f64>,
    }

    impl Listable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.city]
        }

        fn filter_value(&self, field: &str) -> Option<String> {
            match field {
                "kind" => Some(self.kind.to_string()),
                _ => None,
            }
        }

        fn sort_key(&self, field: &str) -> Option<SortKey> {
            match field {
                "name" => Some(SortKey::text(self.name)),
                "score" => Some(SortKey::optional(self.score, SortKey::number)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Alice", city: "Boston", kind: "intern", score: Some(3.0) },
            Row { name: "bob", city: "Austin", kind: "full_time", score: Some(5.0) },
            Row { name: "Carol", city: "Boulder", kind: "intern", score: None },
            Row { name: "Dave", city: "Denver", kind: "full_time", score: Some(3.0) },
        ]
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListQuery::from_params(&params, &Config::default())
    }

    fn names(page: &Page<Row>) -> Vec<&'static str> {
        page.items.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let page = apply(rows(), &query(&[("search", "BO")]));
        assert_eq!(names(&page), vec!["Alice", "bob", "Carol"]);
    }

    #[test]
    fn test_all_filter_returns_everything() {
        let page = apply(rows(), &query(&[("kind", "all")]));
        assert_eq!(page.items, rows());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_categorical_filter() {
        let page = apply(rows(), &query(&[("kind", "INTERN")]));
        assert_eq!(names(&page), vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_unknown_filter_matches_nothing() {
        let page = apply(rows(), &query(&[("colour", "red")]));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let asc = apply(rows(), &query(&[("sort_by", "score")]));
        assert_eq!(names(&asc), vec!["Carol", "Alice", "Dave", "bob"]);

        let desc = apply(rows(), &query(&[("sort_by", "score"), ("order", "desc")]));
        assert_eq!(names(&desc), vec!["bob", "Alice", "Dave", "Carol"]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let page = apply(rows(), &query(&[("sort_by", "name")]));
        assert_eq!(names(&page), vec!["Alice", "bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_pagination_slices() {
        let page = apply(rows(), &query(&[("page", "2"), ("page_size", "3")]));
        assert_eq!(names(&page), vec!["Dave"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);

        let past_end = apply(rows(), &query(&[("page", "9"), ("page_size", "3")]));
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn test_page_size_is_capped() {
        let q = query(&[("page_size", "100000")]);
        assert_eq!(q.page_size, Config::default().max_page_size);
    }

    #[test]
    fn test_with_default_filter_respects_caller() {
        let q = query(&[("kind", "intern")]).with_default_filter("kind", "full_time");
        assert_eq!(q.filters, vec![("kind".to_string(), "intern".to_string())]);

        let forced = query(&[("kind", "intern")]).with_filter("kind", "full_time");
        assert_eq!(forced.filters, vec![("kind".to_string(), "full_time".to_string())]);
    }
}
