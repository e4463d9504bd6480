//! Search request and response types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::SearchListing;

/// Parameters of a listing search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchParams {
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,

    /// Page size
    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: usize,

    /// City name, "all" means no restriction
    #[serde(default)]
    pub city: Option<String>,

    /// Hotel category, "all" means no restriction
    #[serde(default)]
    pub hotel_type: Option<String>,

    #[serde(default)]
    pub price_min: Option<f64>,

    #[serde(default)]
    pub price_max: Option<f64>,

    /// Free-text query
    #[serde(default)]
    pub query: Option<String>,

    /// Force the demo dataset even when live data is enabled
    #[serde(default)]
    pub use_demo: bool,
}

fn default_hits_per_page() -> usize {
    8
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: 0,
            hits_per_page: default_hits_per_page(),
            city: None,
            hotel_type: None,
            price_min: None,
            price_max: None,
            query: None,
            use_demo: false,
        }
    }
}

/// True when a select-style filter value actually restricts results.
pub fn is_selected(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "all")
}

/// Where a page of results came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
    Cache,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataSource::Live => "live",
            DataSource::Demo => "demo",
            DataSource::Cache => "cache",
        };
        f.write_str(s)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub listings: Vec<SearchListing>,
    pub total_hits: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub source: DataSource,
}

impl SearchPage {
    /// Build a page by slicing `items` at `page * hits_per_page`.
    ///
    /// `hits_per_page` of zero is treated as one.
    pub fn paginate<T, F>(items: &[T], page: usize, hits_per_page: usize, convert: F) -> Self
    where
        F: Fn(&T) -> SearchListing,
    {
        let per_page = hits_per_page.max(1);
        let start = page.saturating_mul(per_page).min(items.len());
        let end = start.saturating_add(per_page).min(items.len());

        Self {
            listings: items[start..end].iter().map(convert).collect(),
            total_hits: items.len(),
            current_page: page,
            total_pages: items.len().div_ceil(per_page),
            source: DataSource::Demo,
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }
}
