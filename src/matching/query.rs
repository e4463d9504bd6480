// src/matching/query.rs

//! Free-text listing search.
//!
//! Extracts budget, location, yield, tourism, hotel type, star and quality
//! hints from a sentence with keyword rules, then ranks listings by how
//! many of those hints they satisfy.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::HotelListing;
use crate::utils::dedup_in_order;

/// Minimum relevance a listing needs to be returned.
pub const MIN_RELEVANCE: u32 = 15;

/// Maximum number of listings returned.
pub const MAX_RESULTS: usize = 5;

/// Yield assumed for "high yield" style phrases without a number.
pub const DEFAULT_HIGH_YIELD: f64 = 8.0;

const TOURIST_CITIES: &[&str] = &["jeddah", "riyadh", "mecca", "medina"];

const TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    ("business", &["business", "corporate", "commercial"]),
    ("boutique", &["boutique", "unique", "specialty"]),
    ("luxury", &["luxury", "premium", "upscale", "high-end"]),
    ("furnished", &["furnished", "serviced"]),
];

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)under ([0-9]+)m",
        r"(?i)below ([0-9]+)m",
        r"(?i)less than ([0-9]+)m",
        r"(?i)([0-9]+)m or less",
        r"(?i)under ([0-9]+) million",
        r"(?i)below ([0-9]+) million",
        r"(?i)budget.*?([0-9]+)m",
    ])
});

static YIELD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)high yield",
        r"(?i)high return",
        r"(?i)good return",
        r"(?i)([0-9]+(?:\.[0-9]+)?)%.*?irr",
        r"(?i)irr.*?([0-9]+(?:\.[0-9]+)?)%",
        r"(?i)return.*?([0-9]+(?:\.[0-9]+)?)%",
    ])
});

static STAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*star").ok());

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

/// Hints understood from a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryCriteria {
    pub max_price: Option<f64>,
    /// Lowercased city
    pub city: Option<String>,
    pub min_irr: Option<f64>,
    pub tourism: bool,
    /// Lowercased dataset hotel type
    pub hotel_type: Option<String>,
    pub min_stars: Option<u32>,
    pub min_ai_score: Option<f64>,
    /// Labels of the hints that were recognised, in detection order
    pub understood: Vec<String>,
}

/// A listing with its relevance to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHotel<'a> {
    pub hotel: &'a HotelListing,
    pub relevance: u32,
    pub matched_criteria: Vec<String>,
}

/// Parsed hints and the best matching listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<'a> {
    pub criteria: QueryCriteria,
    pub results: Vec<RankedHotel<'a>>,
}

/// Parse `query` and rank `hotels` against it.
pub fn search_by_query<'a>(query: &str, hotels: &'a [HotelListing]) -> QueryResults<'a> {
    let criteria = parse_query(query, hotels);
    log::debug!("Understood {:?} from query", criteria.understood);
    let results = rank_hotels(query, &criteria, hotels);
    QueryResults { criteria, results }
}

/// Extract search hints from free text.
///
/// City and hotel type are only recognised when they exist in `hotels`.
pub fn parse_query(query: &str, hotels: &[HotelListing]) -> QueryCriteria {
    let lower = query.to_lowercase();
    let mut criteria = QueryCriteria::default();

    if let Some(amount) = first_capture(&PRICE_PATTERNS, &lower)
        .and_then(|caps| caps.and_then(|c| c.parse::<u64>().ok()))
    {
        criteria.max_price = Some(amount as f64 * 1_000_000.0);
        criteria.understood.push("Budget".to_string());
    }

    let cities = dedup_in_order(hotels.iter().map(|h| h.city.to_lowercase()));
    if let Some(city) = cities.into_iter().find(|c| lower.contains(c.as_str())) {
        criteria.city = Some(city);
        criteria.understood.push("Location".to_string());
    }

    if let Some(capture) = first_capture(&YIELD_PATTERNS, &lower) {
        let min_irr = capture
            .and_then(|c| c.parse::<f64>().ok())
            .unwrap_or(DEFAULT_HIGH_YIELD);
        criteria.min_irr = Some(min_irr);
        criteria.understood.push("Yield".to_string());
    }

    if lower.contains("tourism") || lower.contains("tourist") {
        criteria.tourism = true;
        criteria.understood.push("Tourism Potential".to_string());
    }

    let types = dedup_in_order(hotels.iter().map(|h| h.hotel_type.to_lowercase()));
    for (category, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            if let Some(kind) = types.iter().find(|t| t.contains(category)) {
                criteria.hotel_type = Some(kind.clone());
                criteria.understood.push("Hotel Type".to_string());
                break;
            }
        }
    }

    if let Some(stars) = STAR_PATTERN
        .as_ref()
        .and_then(|re| re.captures(&lower))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
    {
        criteria.min_stars = Some(stars);
        criteria.understood.push("Star Rating".to_string());
    }

    if lower.contains("high quality") || lower.contains("top rated") || lower.contains("best") {
        criteria.min_ai_score = Some(70.0);
        criteria.understood.push("Quality Score".to_string());
    }

    criteria
}

/// Find the first pattern that matches, returning its first capture if any.
///
/// The outer `Option` is "did anything match", the inner one is "did the
/// match capture a number".
fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<Option<&'t str>> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .map(|caps| caps.get(1).map(|m| m.as_str()))
    })
}

/// Score every listing, keep those above [`MIN_RELEVANCE`], best first.
pub fn rank_hotels<'a>(
    query: &str,
    criteria: &QueryCriteria,
    hotels: &'a [HotelListing],
) -> Vec<RankedHotel<'a>> {
    let lower = query.to_lowercase();
    let query_words: Vec<&str> = lower.split(' ').collect();

    let mut ranked: Vec<RankedHotel<'a>> = hotels
        .iter()
        .map(|hotel| score_hotel(hotel, criteria, &query_words))
        .filter(|r| r.relevance > MIN_RELEVANCE)
        .collect();

    ranked.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    ranked.truncate(MAX_RESULTS);
    ranked
}

fn score_hotel<'a>(
    hotel: &'a HotelListing,
    criteria: &QueryCriteria,
    query_words: &[&str],
) -> RankedHotel<'a> {
    let mut relevance = 0;
    let mut matched = Vec::new();
    let city = hotel.city.to_lowercase();
    let title = hotel.title.to_lowercase();

    if let Some(max) = criteria.max_price.filter(|m| *m > 0.0) {
        if hotel.price <= max {
            relevance += 30;
            matched.push("Budget".to_string());
        }
    }

    if let Some(wanted) = &criteria.city {
        if city.contains(wanted.as_str()) || title.contains(wanted.as_str()) {
            relevance += 40;
            matched.push("Location".to_string());
        }
    }

    if let Some(min) = criteria.min_irr.filter(|m| *m != 0.0) {
        if hotel.irr >= min {
            relevance += 25;
            matched.push("Yield".to_string());
        }
    }

    if criteria.tourism && TOURIST_CITIES.iter().any(|t| city.contains(t)) {
        relevance += 20;
        matched.push("Tourism Potential".to_string());
    }

    if let Some(kind) = &criteria.hotel_type {
        if hotel.hotel_type.to_lowercase().contains(kind.as_str()) {
            relevance += 25;
            matched.push("Hotel Type".to_string());
        }
    }

    if let Some(min) = criteria.min_stars.filter(|m| *m > 0) {
        if u32::from(hotel.stars) >= min {
            relevance += 15;
            matched.push("Star Rating".to_string());
        }
    }

    if let Some(min) = criteria.min_ai_score.filter(|m| *m > 0.0) {
        if hotel.ai_score >= min {
            relevance += 10;
            matched.push("Quality Score".to_string());
        }
    }

    let common = title
        .split(' ')
        .filter(|word| query_words.contains(word))
        .count() as u32;
    if common > 0 {
        relevance += common * 2;
        if common > 2 {
            matched.push("Title Match".to_string());
        }
    }

    if relevance == 0 {
        relevance = 10;
    }

    RankedHotel {
        hotel,
        relevance,
        matched_criteria: matched,
    }
}
