// src/matching/mod.rs

//! Filtering and scoring over hotel listings.
//!
//! Everything here is pure: listings go in, filtered or ranked references
//! come out. No I/O happens in this module.

pub mod criteria;
pub mod filter;
pub mod investor;
pub mod query;
pub mod score;

pub use criteria::{CriteriaFilter, ScoredHotel, score_by_criteria};
pub use filter::{HotelFilter, SEARCH_PRICE_CEILING, filter_for_search};
pub use investor::{
    InvestorAnalysis, InvestorSignals, PropertyMatch, Recommendation, RiskLevel,
    analyze_investor_profile,
};
pub use query::{QueryCriteria, QueryResults, RankedHotel, parse_query, search_by_query};
pub use score::{MatchCriteria, MatchScore, RiskTolerance, score_hotel_match};
