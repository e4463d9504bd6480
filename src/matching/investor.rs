// src/matching/investor.rs

//! Investor profile analysis.
//!
//! Reads a free-text self description, suggests hotel categories that fit
//! the investor's risk appetite and picks the best scoring listings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::matching::score::{MatchCriteria, RiskTolerance, score_hotel_match};
use crate::models::HotelListing;
use crate::utils::dedup_in_order;

/// Number of listings suggested for a profile.
pub const TOP_PROPERTIES: usize = 3;

const KNOWN_CITIES: &[&str] = &["jeddah", "riyadh", "sakaka", "jazan", "abha", "al rass"];

static BUDGET_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)m|([0-9]+) million").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// A suggested hotel category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub hotel_type: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub expected_return: String,
}

impl Recommendation {
    fn new(
        hotel_type: &str,
        description: &str,
        risk_level: RiskLevel,
        expected_return: &str,
    ) -> Self {
        Self {
            hotel_type: hotel_type.to_string(),
            description: description.to_string(),
            risk_level,
            expected_return: expected_return.to_string(),
        }
    }
}

/// Signals picked up from the investor's description.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvestorSignals {
    pub first_time: bool,
    pub low_risk: bool,
    pub high_return: bool,
    pub luxury: bool,
    /// Budget ceiling in currency units
    pub budget: Option<f64>,
    pub city: Option<String>,
}

impl InvestorSignals {
    pub fn from_description(description: &str) -> Self {
        let lower = description.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        let budget = BUDGET_PATTERN
            .as_ref()
            .and_then(|re| re.captures(&lower))
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .filter(|millions| *millions > 0)
            .map(|millions| millions as f64 * 1_000_000.0);

        Self {
            first_time: any(&["first-time", "new", "beginner"]),
            low_risk: any(&["low risk", "stable", "safe"]),
            high_return: any(&["high return", "aggressive", "growth"]),
            luxury: any(&["luxury", "premium", "upscale"]),
            budget,
            city: KNOWN_CITIES
                .iter()
                .find(|c| lower.contains(*c))
                .map(|c| c.to_string()),
        }
    }

    /// Risk appetite, low risk taking precedence over high return.
    pub fn risk_tolerance(&self) -> RiskTolerance {
        if self.low_risk {
            RiskTolerance::Low
        } else if self.high_return {
            RiskTolerance::High
        } else {
            RiskTolerance::Medium
        }
    }

    pub fn target_irr(&self) -> f64 {
        if self.high_return { 8.5 } else { 7.5 }
    }

    pub fn match_criteria(&self) -> MatchCriteria {
        MatchCriteria {
            preferred_city: self.city.clone(),
            preferred_type: None,
            budget_range: self.budget.map(|b| (0.0, b)),
            target_irr: Some(self.target_irr()),
            risk_tolerance: Some(self.risk_tolerance()),
        }
    }
}

/// A listing chosen for the investor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyMatch<'a> {
    pub hotel: &'a HotelListing,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
}

/// Outcome of a profile analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorAnalysis<'a> {
    pub signals: InvestorSignals,
    pub recommendations: Vec<Recommendation>,
    pub properties: Vec<PropertyMatch<'a>>,
}

/// Analyse an investor description against the available listings.
pub fn analyze_investor_profile<'a>(
    description: &str,
    hotels: &'a [HotelListing],
) -> InvestorAnalysis<'a> {
    let signals = InvestorSignals::from_description(description);
    let recommendations = recommend_types(&signals, hotels);

    let criteria = signals.match_criteria();
    let mut properties: Vec<PropertyMatch<'a>> = hotels
        .iter()
        .map(|hotel| {
            let scored = score_hotel_match(hotel, &criteria);
            PropertyMatch {
                hotel,
                match_score: scored.score,
                match_reasons: scored.reasons,
            }
        })
        .collect();
    properties.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    properties.truncate(TOP_PROPERTIES);

    InvestorAnalysis {
        signals,
        recommendations,
        properties,
    }
}

/// Suggest hotel categories present in the dataset.
pub fn recommend_types(signals: &InvestorSignals, hotels: &[HotelListing]) -> Vec<Recommendation> {
    let types = dedup_in_order(hotels.iter().map(|h| h.hotel_type.as_str()));
    let first_with = |needles: &[&str]| {
        types
            .iter()
            .find(|t| {
                let lower = t.to_lowercase();
                needles.iter().any(|n| lower.contains(n))
            })
            .copied()
    };

    let mut recommendations = Vec::new();

    if signals.first_time || signals.low_risk {
        if let Some(kind) = first_with(&["business", "furnished"]) {
            recommendations.push(Recommendation::new(
                kind,
                "Stable income with established operations and lower management complexity",
                RiskLevel::Low,
                "7-9%",
            ));
        }
    }

    if signals.high_return || !signals.low_risk {
        if let Some(kind) = first_with(&["boutique"]) {
            recommendations.push(Recommendation::new(
                kind,
                "Higher margins with unique positioning and premium pricing potential",
                RiskLevel::Medium,
                "9-12%",
            ));
        }
    }

    if signals.luxury || signals.high_return {
        if let Some(kind) = first_with(&["luxury", "resort"]) {
            recommendations.push(Recommendation::new(
                kind,
                "Premium market positioning with high ADR and strong brand value",
                RiskLevel::High,
                "10-15%",
            ));
        }
    }

    if recommendations.is_empty() {
        let kind = types.first().copied().unwrap_or("Business Hotel");
        recommendations.push(Recommendation::new(
            kind,
            "Balanced risk-return profile suitable for most investors",
            RiskLevel::Medium,
            "8-10%",
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_hotels;

    #[test]
    fn test_signals_from_description() {
        let signals = InvestorSignals::from_description(
            "I'm a first-time international investor looking for stable returns with low risk. \
             I prefer established properties in Jeddah under 35M SAR.",
        );
        assert!(signals.first_time);
        assert!(signals.low_risk);
        assert!(!signals.high_return);
        assert_eq!(signals.budget, Some(35_000_000.0));
        assert_eq!(signals.city.as_deref(), Some("jeddah"));
        assert_eq!(signals.risk_tolerance(), RiskTolerance::Low);
        assert_eq!(signals.target_irr(), 7.5);
    }

    #[test]
    fn test_budget_in_words() {
        let signals = InvestorSignals::from_description("budget of 20 million");
        assert_eq!(signals.budget, Some(20_000_000.0));
        assert_eq!(InvestorSignals::from_description("no budget").budget, None);
        assert_eq!(InvestorSignals::from_description("budget ٥٠m").budget, None);
    }

    #[test]
    fn test_low_risk_recommendations() {
        let hotels = sample_hotels();
        let signals = InvestorSignals::from_description("safe and stable please");
        let recs = recommend_types(&signals, &hotels);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].hotel_type, "Business Hotel");
        assert_eq!(recs[0].risk_level, RiskLevel::Low);
        assert_eq!(recs[0].expected_return, "7-9%");
    }

    #[test]
    fn test_aggressive_recommendations() {
        let hotels = sample_hotels();
        let signals = InvestorSignals::from_description("aggressive growth");
        let recs = recommend_types(&signals, &hotels);

        let kinds: Vec<&str> = recs.iter().map(|r| r.hotel_type.as_str()).collect();
        assert_eq!(kinds, vec!["Boutique Hotel", "Luxury Resort"]);
        assert_eq!(recs[1].risk_level, RiskLevel::High);
    }

    #[test]
    fn test_fallback_recommendation() {
        let hotels: Vec<HotelListing> = sample_hotels()
            .into_iter()
            .filter(|h| h.hotel_type == "Luxury Resort")
            .collect();
        let signals = InvestorSignals::from_description("something neutral");
        let recs = recommend_types(&signals, &hotels);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].hotel_type, "Luxury Resort");
        assert_eq!(recs[0].expected_return, "8-10%");

        let none = recommend_types(&signals, &[]);
        assert_eq!(none[0].hotel_type, "Business Hotel");
    }

    #[test]
    fn test_profile_picks_top_three() {
        let hotels = sample_hotels();
        let analysis = analyze_investor_profile(
            "First-time investor, low risk, Jeddah, under 35m",
            &hotels,
        );

        assert_eq!(analysis.properties.len(), TOP_PROPERTIES);
        // h1: city 25 + budget 30 + IRR 25 + low risk 15
        assert_eq!(analysis.properties[0].hotel.id, "h1");
        assert_eq!(analysis.properties[0].match_score, 95);
        assert!(analysis
            .properties
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }
}
