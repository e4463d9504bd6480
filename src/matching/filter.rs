// src/matching/filter.rs

//! Filter predicates over hotel listings.

use serde::{Deserialize, Serialize};

use crate::models::{HotelListing, SearchParams, is_selected};

/// Upper price bound at or above which the search filter is a no-op.
pub const SEARCH_PRICE_CEILING: f64 = 200_000_000.0;

/// Catalog filter with inclusive, optional bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HotelFilter {
    /// Exact city, "all" disables
    pub city: Option<String>,
    /// Exact hotel type, "all" disables
    pub hotel_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_irr: Option<f64>,
    pub max_irr: Option<f64>,
    pub min_ai_score: Option<f64>,
    pub max_ai_score: Option<f64>,
    pub min_stars: Option<u8>,
    pub max_stars: Option<u8>,
    /// Substring of "title city type", case-insensitive
    pub search_query: Option<String>,
}

impl HotelFilter {
    /// Check a single listing against every set bound.
    pub fn matches(&self, hotel: &HotelListing) -> bool {
        if is_selected(self.city.as_deref()) && self.city.as_deref() != Some(hotel.city.as_str()) {
            return false;
        }
        if is_selected(self.hotel_type.as_deref())
            && self.hotel_type.as_deref() != Some(hotel.hotel_type.as_str())
        {
            return false;
        }

        if !within(hotel.price, self.min_price, self.max_price) {
            return false;
        }
        if !within(hotel.irr, self.min_irr, self.max_irr) {
            return false;
        }
        if !within(hotel.ai_score, self.min_ai_score, self.max_ai_score) {
            return false;
        }
        if !within(hotel.stars, self.min_stars, self.max_stars) {
            return false;
        }

        match self.search_query.as_deref() {
            Some(query) if !query.is_empty() => hotel
                .searchable_text()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }

    /// Keep the listings that match, in dataset order.
    pub fn apply<'a>(&self, hotels: &'a [HotelListing]) -> Vec<&'a HotelListing> {
        hotels.iter().filter(|h| self.matches(h)).collect()
    }
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

/// Filter the demo dataset the way a listing search does.
///
/// A `price_min` of zero or less and a `price_max` at or above
/// [`SEARCH_PRICE_CEILING`] are treated as unset. The query must appear in
/// the title, city or hotel type.
pub fn filter_for_search<'a>(
    hotels: &'a [HotelListing],
    params: &SearchParams,
) -> Vec<&'a HotelListing> {
    let mut filtered: Vec<&HotelListing> = hotels.iter().collect();
    log::debug!("Filtering {} hotels with {:?}", filtered.len(), params);

    if let Some(city) = params.city.as_deref().filter(|c| is_selected(Some(*c))) {
        filtered.retain(|h| h.city == city);
        log::debug!("After city filter: {} hotels", filtered.len());
    }

    if let Some(kind) = params.hotel_type.as_deref().filter(|t| is_selected(Some(*t))) {
        filtered.retain(|h| h.hotel_type == kind);
        log::debug!("After hotel type filter: {} hotels", filtered.len());
    }

    if let Some(min) = params.price_min.filter(|m| *m > 0.0) {
        filtered.retain(|h| h.price >= min);
    }
    if let Some(max) = params.price_max.filter(|m| *m < SEARCH_PRICE_CEILING) {
        filtered.retain(|h| h.price <= max);
    }

    if let Some(query) = params.query.as_deref().filter(|q| !q.trim().is_empty()) {
        let query = query.to_lowercase();
        filtered.retain(|h| {
            h.title.to_lowercase().contains(&query)
                || h.city.to_lowercase().contains(&query)
                || h.hotel_type.to_lowercase().contains(&query)
        });
        log::debug!("After search filter: {} hotels", filtered.len());
    }

    filtered
}
