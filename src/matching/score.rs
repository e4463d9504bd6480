// src/matching/score.rs

//! Point-sum match score between an investor's criteria and a listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::HotelListing;

/// Score given when no criterion matched.
pub const GENERAL_MATCH_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl FromStr for RiskTolerance {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::validation(format!(
                "unknown risk tolerance '{other}', expected low, medium or high"
            ))),
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// What an investor is looking for. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchCriteria {
    pub preferred_city: Option<String>,
    pub preferred_type: Option<String>,
    /// Inclusive `(min, max)` price range
    pub budget_range: Option<(f64, f64)>,
    pub target_irr: Option<f64>,
    pub risk_tolerance: Option<RiskTolerance>,
}

/// Score and the reasons that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Score a listing against investor criteria.
///
/// Points: city 25, type 20, budget 30, IRR target 25, risk 15/10/5.
/// Empty strings and a zero IRR target count as unset. A listing that
/// matches nothing still scores [`GENERAL_MATCH_SCORE`].
pub fn score_hotel_match(hotel: &HotelListing, criteria: &MatchCriteria) -> MatchScore {
    let mut score = 0;
    let mut reasons = Vec::new();

    if let Some(city) = non_empty(&criteria.preferred_city) {
        if hotel.city.to_lowercase().contains(&city.to_lowercase()) {
            score += 25;
            reasons.push("Preferred location".to_string());
        }
    }

    if let Some(kind) = non_empty(&criteria.preferred_type) {
        if hotel.hotel_type.to_lowercase().contains(&kind.to_lowercase()) {
            score += 20;
            reasons.push("Matching hotel type".to_string());
        }
    }

    if let Some((min, max)) = criteria.budget_range {
        if hotel.price >= min && hotel.price <= max {
            score += 30;
            reasons.push("Within budget".to_string());
        }
    }

    if let Some(target) = criteria.target_irr.filter(|t| *t != 0.0) {
        if hotel.irr >= target {
            score += 25;
            reasons.push("Meets IRR target".to_string());
        }
    }

    match criteria.risk_tolerance {
        Some(RiskTolerance::Low) if hotel.ai_score >= 70.0 => {
            score += 15;
            reasons.push("Low risk profile".to_string());
        }
        Some(RiskTolerance::Medium) if hotel.ai_score >= 60.0 => {
            score += 10;
            reasons.push("Moderate risk profile".to_string());
        }
        Some(RiskTolerance::High) => {
            score += 5;
            reasons.push("High growth potential".to_string());
        }
        _ => {}
    }

    if score == 0 {
        score = GENERAL_MATCH_SCORE;
        reasons.push("General match".to_string());
    }

    MatchScore { score, reasons }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
