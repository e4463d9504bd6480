// src/services/search.rs

//! Listing search orchestration.
//!
//! Live data comes from the hosted search API and is cached per query.
//! When live data is off, the caller asks for demo data, or every host
//! fails, the demo catalog is filtered and paginated instead.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::matching::filter_for_search;
use crate::models::{Config, DataSource, HotelListing, SearchListing, SearchPage, SearchParams};
use crate::services::cache::ResponseCache;
use crate::services::catalog::HotelCatalog;
use crate::services::live::{ListingBackend, LiveQuery, SearchApiClient};

/// Entry point for listing searches.
pub struct SearchService {
    catalog: Arc<HotelCatalog>,
    backend: Arc<dyn ListingBackend>,
    cache: ResponseCache<SearchPage>,
    use_live_data: bool,
}

impl SearchService {
    /// Build a service talking to the configured search hosts.
    pub fn new(config: &Config, catalog: Arc<HotelCatalog>) -> Result<Self> {
        let client = SearchApiClient::new(&config.search)?;
        Ok(Self::with_backend(config, catalog, Arc::new(client)))
    }

    pub fn with_backend(
        config: &Config,
        catalog: Arc<HotelCatalog>,
        backend: Arc<dyn ListingBackend>,
    ) -> Self {
        Self {
            catalog,
            backend,
            cache: ResponseCache::new(&config.cache),
            use_live_data: config.search.use_live_data,
        }
    }

    pub fn uses_live_data(&self) -> bool {
        self.use_live_data
    }

    /// Run a search.
    ///
    /// Demo mode fails when the dataset is missing or empty. A failed live
    /// search never fails: it degrades to the demo dataset, which may
    /// itself be empty.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchPage> {
        if params.use_demo || !self.use_live_data {
            log::debug!("Using demo data for search");
            return self.search_demo(params).await;
        }

        let query = LiveQuery::from_params(params);
        let key = ResponseCache::<SearchPage>::key(&query)?;

        if let Some(page) = self.cache.get(&key) {
            log::debug!("Returning cached search response");
            return Ok(page.with_source(DataSource::Cache));
        }

        match self.backend.search(&query).await {
            Ok(page) => {
                self.cache.insert(key, page.clone());
                Ok(page)
            }
            Err(e) => {
                log::warn!("Live search failed, falling back to demo data: {}", e);
                let hotels = self.catalog.load_or_empty().await;
                Ok(paginate_demo(&filter_for_search(hotels, params), params))
            }
        }
    }

    async fn search_demo(&self, params: &SearchParams) -> Result<SearchPage> {
        let hotels = self
            .catalog
            .load()
            .await
            .map_err(AppError::data_unavailable)?;
        if hotels.is_empty() {
            return Err(AppError::data_unavailable("dataset is empty"));
        }

        let filtered = filter_for_search(hotels, params);
        log::info!("Demo search matched {} of {} hotels", filtered.len(), hotels.len());
        Ok(paginate_demo(&filtered, params))
    }

    /// Drop every cached live response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn paginate_demo(filtered: &[&HotelListing], params: &SearchParams) -> SearchPage {
    SearchPage::paginate(filtered, params.page, params.hits_per_page, |h| {
        SearchListing::from(*h)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::models::SearchConfig;
    use crate::testing::{StubReply, dead_host, sample_hotels, stub_host};

    struct CountingBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingBackend {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl ListingBackend for CountingBackend {
        async fn search(&self, query: &LiveQuery) -> Result<SearchPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::AllHostsFailed { attempts: 2 });
            }
            let hotels = sample_hotels();
            let page = SearchPage::paginate(&hotels[..2], query.page, query.hits_per_page, |h| {
                SearchListing::from(h)
            });
            Ok(page.with_source(DataSource::Live))
        }
    }

    fn live_config() -> Config {
        let mut config = Config::default();
        config.search.use_live_data = true;
        config
    }

    fn catalog() -> Arc<HotelCatalog> {
        Arc::new(HotelCatalog::from_hotels(sample_hotels()))
    }

    #[tokio::test]
    async fn test_demo_mode_filters_and_paginates() {
        let service =
            SearchService::with_backend(&Config::default(), catalog(), CountingBackend::new(false));
        let params = SearchParams {
            hits_per_page: 2,
            page: 1,
            ..SearchParams::default()
        };
        let page = service.search(&params).await.unwrap();

        assert_eq!(page.source, DataSource::Demo);
        assert_eq!(page.total_hits, 6);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.listings.len(), 2);
        assert_eq!(page.listings[0].title, "Red Sea Luxury Resort");
    }

    #[tokio::test]
    async fn test_use_demo_overrides_live_mode() {
        let backend = CountingBackend::new(false);
        let service = SearchService::with_backend(&live_config(), catalog(), backend.clone());
        let params = SearchParams {
            use_demo: true,
            city: Some("Jeddah".into()),
            ..SearchParams::default()
        };
        let page = service.search(&params).await.unwrap();

        assert!(service.uses_live_data());
        assert_eq!(page.source, DataSource::Demo);
        assert_eq!(page.total_hits, 2);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_demo_mode_errors_on_missing_or_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Arc::new(HotelCatalog::new(dir.path().join("missing.json")));
        let service =
            SearchService::with_backend(&Config::default(), missing, CountingBackend::new(false));
        let err = service.search(&SearchParams::default()).await.unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
        assert!(err.to_string().starts_with("Failed to load hotel data"));

        let empty = Arc::new(HotelCatalog::from_hotels(Vec::new()));
        let service =
            SearchService::with_backend(&Config::default(), empty, CountingBackend::new(false));
        assert!(matches!(
            service.search(&SearchParams::default()).await,
            Err(AppError::DataUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_live_response_is_cached() {
        let backend = CountingBackend::new(false);
        let service = SearchService::with_backend(&live_config(), catalog(), backend.clone());
        let params = SearchParams::default();

        let first = service.search(&params).await.unwrap();
        assert_eq!(first.source, DataSource::Live);

        let second = service.search(&params).await.unwrap();
        assert_eq!(second.source, DataSource::Cache);
        assert_eq!(second.listings, first.listings);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

        let other_page = SearchParams {
            page: 1,
            ..SearchParams::default()
        };
        service.search(&other_page).await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

        service.clear_cache();
        let refetched = service.search(&params).await.unwrap();
        assert_eq!(refetched.source, DataSource::Live);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_live_failure_falls_back_to_demo() {
        let backend = CountingBackend::new(true);
        let service = SearchService::with_backend(&live_config(), catalog(), backend.clone());
        let params = SearchParams {
            hotel_type: Some("Boutique Hotel".into()),
            ..SearchParams::default()
        };

        let page = service.search(&params).await.unwrap();
        assert_eq!(page.source, DataSource::Demo);
        assert_eq!(page.total_hits, 2);

        // failures are not cached
        service.search(&params).await.unwrap();
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_live_failure_with_missing_data_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Arc::new(HotelCatalog::new(dir.path().join("missing.json")));
        let service =
            SearchService::with_backend(&live_config(), missing, CountingBackend::new(true));

        let page = service.search(&SearchParams::default()).await.unwrap();
        assert_eq!(page.source, DataSource::Demo);
        assert!(page.listings.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_host_failover_then_demo() {
        let body = r#"{"results":[{"hits":[{"title_l1":"Sea view hotel","price":40000000}],"nbHits":1,"page":0,"nbPages":1}]}"#;
        let (good, captured) = stub_host(StubReply::ok(body)).await;

        let mut config = live_config();
        config.search = SearchConfig {
            hosts: vec![dead_host().await, good],
            use_live_data: true,
            ..SearchConfig::default()
        };
        let service = SearchService::new(&config, catalog()).unwrap();

        let page = service.search(&SearchParams::default()).await.unwrap();
        assert_eq!(page.source, DataSource::Live);
        assert_eq!(page.listings[0].title, "Sea view hotel");
        assert_eq!(captured.lock().unwrap().len(), 1);

        let mut all_dead = live_config();
        all_dead.search.hosts = vec![dead_host().await, dead_host().await];
        let service = SearchService::new(&all_dead, catalog()).unwrap();
        let page = service.search(&SearchParams::default()).await.unwrap();
        assert_eq!(page.source, DataSource::Demo);
        assert_eq!(page.total_hits, 6);
    }
}
