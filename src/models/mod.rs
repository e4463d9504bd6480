// src/models/mod.rs

//! Domain models for the hotel matching application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod hotel;
mod listing;
mod search;

// Re-export all public types
pub use config::{CacheConfig, Config, DataConfig, SearchConfig, USE_LIVE_DATA_ENV};
pub use hotel::HotelListing;
pub use listing::{
    Category, CoverPhoto, DEFAULT_COUNTRY, Geography, GeographyLevel, Location, LocationLevel,
    SearchListing, city_slug,
};
pub use search::{DataSource, SearchPage, SearchParams, is_selected};
