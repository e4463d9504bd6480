// src/matching/criteria.rs

//! Criteria scoring: filter listings by explicit ranges, then rank them by
//! how many of the criteria they satisfy.

use serde::{Deserialize, Serialize};

use crate::matching::filter::HotelFilter;
use crate::models::HotelListing;

/// Explicit investment criteria with slider-style defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriteriaFilter {
    pub hotel_type: String,
    pub city: String,
    pub min_stars: u8,
    pub max_stars: u8,
    pub min_irr: f64,
    pub max_irr: f64,
    pub min_ai_score: f64,
    pub max_ai_score: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for CriteriaFilter {
    fn default() -> Self {
        Self {
            hotel_type: "all".to_string(),
            city: "all".to_string(),
            min_stars: 1,
            max_stars: 5,
            min_irr: 0.0,
            max_irr: 15.0,
            min_ai_score: 0.0,
            max_ai_score: 100.0,
            min_price: 0.0,
            max_price: 50_000_000.0,
        }
    }
}

impl CriteriaFilter {
    fn as_hotel_filter(&self) -> HotelFilter {
        HotelFilter {
            city: Some(self.city.clone()),
            hotel_type: Some(self.hotel_type.clone()),
            min_price: Some(self.min_price),
            max_price: Some(self.max_price),
            min_irr: Some(self.min_irr),
            max_irr: Some(self.max_irr),
            min_ai_score: Some(self.min_ai_score),
            max_ai_score: Some(self.max_ai_score),
            min_stars: Some(self.min_stars),
            max_stars: Some(self.max_stars),
            search_query: None,
        }
    }
}

/// A listing with its criteria score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHotel<'a> {
    pub hotel: &'a HotelListing,
    pub total_score: u32,
    pub matched_criteria: Vec<String>,
}

/// Filter `hotels` by `criteria` and rank the survivors, best first.
///
/// Weights: type 25, city 20, stars 15, IRR 20, AI score 10, price 10.
/// A criterion is only reported as matched when it was narrowed from
/// its default.
pub fn score_by_criteria<'a>(
    hotels: &'a [HotelListing],
    criteria: &CriteriaFilter,
) -> Vec<ScoredHotel<'a>> {
    let defaults = CriteriaFilter::default();
    let narrowed_stars =
        criteria.min_stars > defaults.min_stars || criteria.max_stars < defaults.max_stars;
    let narrowed_irr = criteria.min_irr > defaults.min_irr || criteria.max_irr < defaults.max_irr;
    let narrowed_ai = criteria.min_ai_score > defaults.min_ai_score
        || criteria.max_ai_score < defaults.max_ai_score;
    let narrowed_price =
        criteria.min_price > defaults.min_price || criteria.max_price < defaults.max_price;

    let mut scored: Vec<ScoredHotel<'a>> = criteria
        .as_hotel_filter()
        .apply(hotels)
        .into_iter()
        .map(|hotel| {
            let mut total = 0;
            let mut matched = Vec::new();
            let mut award = |hit: bool, points: u32, narrowed: bool, label: &str| {
                if hit {
                    total += points;
                    if narrowed {
                        matched.push(label.to_string());
                    }
                }
            };

            award(
                criteria.hotel_type == "all" || hotel.hotel_type == criteria.hotel_type,
                25,
                criteria.hotel_type != "all",
                "Hotel Type",
            );
            award(
                criteria.city == "all" || hotel.city == criteria.city,
                20,
                criteria.city != "all",
                "Location",
            );
            award(
                hotel.stars >= criteria.min_stars && hotel.stars <= criteria.max_stars,
                15,
                narrowed_stars,
                "Star Rating",
            );
            award(
                hotel.irr >= criteria.min_irr && hotel.irr <= criteria.max_irr,
                20,
                narrowed_irr,
                "IRR Range",
            );
            award(
                hotel.ai_score >= criteria.min_ai_score && hotel.ai_score <= criteria.max_ai_score,
                10,
                narrowed_ai,
                "AI Score",
            );
            award(
                hotel.price >= criteria.min_price && hotel.price <= criteria.max_price,
                10,
                narrowed_price,
                "Price Range",
            );

            ScoredHotel {
                hotel,
                total_score: total,
                matched_criteria: matched,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    scored
}
