// src/services/live.rs

//! Hosted listing search API client.
//!
//! Builds the filter expression for a search, posts it to each configured
//! host in turn and returns the first usable page. Each host attempt is
//! bounded by its own timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{DataSource, SearchConfig, SearchListing, SearchPage, SearchParams, is_selected};
use crate::utils::encode_component;
use crate::utils::http::create_async_client;

const BASE_FILTER: &str = r#"purpose:"for-sale""#;
const CATEGORY_FILTER: &str = r#"(additionalCategories.slug:"hotels" OR additionalCategories.slug:"commercial-lands" OR additionalCategories.slug:"commercial-buildings")"#;

/// Known spellings of cities in the listing index.
const CITY_VARIANTS: &[(&str, &[&str])] = &[
    ("Jeddah", &["jeddah", "Jeddah"]),
    ("Sakaka", &["sakaka", "Sakaka"]),
    ("Jazan", &["jazan", "Jazan"]),
    ("Abha", &["abha", "Abha"]),
    ("Khamis Mushait", &["khamis-mushait", "Khamis Mushait"]),
    ("Al Rass", &["al-rass", "Al Rass"]),
];

/// A search translated into the API's query language.
///
/// Also serves as the cache key for live responses.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuery {
    pub filters: String,
    pub numeric_filters: String,
    pub page: usize,
    pub hits_per_page: usize,
    pub query: Option<String>,
}

impl LiveQuery {
    pub fn from_params(params: &SearchParams) -> Self {
        let mut filters = format!("{BASE_FILTER} AND {CATEGORY_FILTER}");

        if let Some(city) = params.city.as_deref().filter(|c| is_selected(Some(*c))) {
            let variants: Vec<String> = CITY_VARIANTS
                .iter()
                .find(|(name, _)| *name == city)
                .map(|(_, variants)| variants.iter().map(|v| v.to_string()).collect())
                .unwrap_or_else(|| vec![city.to_lowercase()]);

            let city_filters = variants
                .iter()
                .map(|v| {
                    format!(
                        r#"geography.level1.slug:"{v}" OR locationLevel1.l1:"{v}" OR location.l1:"{v}""#
                    )
                })
                .collect::<Vec<_>>()
                .join(" OR ");

            filters.push_str(&format!(" AND ({city_filters})"));
        }

        let numeric_filters = match (params.price_min, params.price_max) {
            (Some(min), Some(max)) => format!("price>={min} AND price<={max}"),
            _ => String::new(),
        };

        Self {
            filters,
            numeric_filters,
            page: params.page,
            hits_per_page: params.hits_per_page,
            query: params.query.clone(),
        }
    }

    /// URL-encoded parameter string for the request body.
    pub fn params_string(&self) -> String {
        let mut parts = vec![
            format!(
                "query={}",
                encode_component(self.query.as_deref().unwrap_or(""))
            ),
            format!("filters={}", encode_component(&self.filters)),
            format!("hitsPerPage={}", self.hits_per_page),
            format!("page={}", self.page),
        ];
        if !self.numeric_filters.is_empty() {
            parts.push(format!(
                "numericFilters={}",
                encode_component(&self.numeric_filters)
            ));
        }
        parts.join("&")
    }
}

/// Source of live listing pages.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// Run a search, returning a page tagged `live`.
    async fn search(&self, query: &LiveQuery) -> Result<SearchPage>;
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    requests: Vec<IndexRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexRequest<'a> {
    index_name: &'a str,
    params: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    hits: Option<Vec<SearchListing>>,
    #[serde(default)]
    nb_hits: Option<usize>,
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    nb_pages: Option<usize>,
}

impl From<QueryResult> for SearchPage {
    fn from(result: QueryResult) -> Self {
        Self {
            listings: result.hits.unwrap_or_default(),
            total_hits: result.nb_hits.unwrap_or(0),
            current_page: result.page.unwrap_or(0),
            total_pages: result.nb_pages.unwrap_or(0),
            source: DataSource::Live,
        }
    }
}

/// Client for the hosted search API with ordered host failover.
pub struct SearchApiClient {
    client: Client,
    hosts: Vec<String>,
    index_name: String,
    application_id: String,
    api_key: String,
    agent: String,
    host_timeout: Duration,
}

impl SearchApiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            hosts: config.hosts.clone(),
            index_name: config.index_name.clone(),
            application_id: config.application_id.clone(),
            api_key: config.api_key.clone(),
            agent: config.agent.clone(),
            host_timeout: config.host_timeout(),
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    async fn query_host(&self, host: &str, body: &RequestBody<'_>) -> Result<SearchPage> {
        let response = self
            .client
            .post(host)
            .header("x-algolia-agent", &self.agent)
            .header("x-algolia-application-id", &self.application_id)
            .header("x-algolia-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::host(host, format!("status {status}")));
        }

        let parsed: QueryResponse = response.json().await?;
        parsed
            .results
            .into_iter()
            .next()
            .map(SearchPage::from)
            .ok_or_else(|| AppError::host(host, "response contained no results"))
    }
}

#[async_trait]
impl ListingBackend for SearchApiClient {
    async fn search(&self, query: &LiveQuery) -> Result<SearchPage> {
        let body = RequestBody {
            requests: vec![IndexRequest {
                index_name: &self.index_name,
                params: query.params_string(),
            }],
        };

        for host in &self.hosts {
            log::debug!("Querying search host {}", host);
            match tokio::time::timeout(self.host_timeout, self.query_host(host, &body)).await {
                Ok(Ok(page)) => {
                    log::info!(
                        "Search host {} returned {} of {} hits",
                        host,
                        page.listings.len(),
                        page.total_hits
                    );
                    return Ok(page);
                }
                Ok(Err(e)) => log::warn!("Search request failed ({}): {}", host, e),
                Err(_) => log::warn!("Search host timed out ({}), trying next", host),
            }
        }

        Err(AppError::AllHostsFailed {
            attempts: self.hosts.len(),
        })
    }
}
