//! Service layer for the hotel matching application.
//!
//! This module contains the I/O side of the application:
//! - Demo dataset loading (`HotelCatalog`)
//! - Live response caching (`ResponseCache`)
//! - Hosted search API access (`SearchApiClient`)
//! - Search orchestration with demo fallback (`SearchService`)

pub mod cache;
pub mod catalog;
pub mod live;
pub mod search;

pub use cache::ResponseCache;
pub use catalog::{HotelCatalog, unique_cities, unique_hotel_types, unique_values};
pub use live::{ListingBackend, LiveQuery, SearchApiClient};
pub use search::SearchService;
