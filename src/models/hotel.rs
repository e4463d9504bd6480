//! Hotel listing record as shipped in the demo dataset.

use serde::{Deserialize, Serialize};

/// A hotel offered for investment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    /// Listing identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// City name as written in the dataset (e.g. "Jeddah")
    pub city: String,

    /// Asking price in `currency`
    pub price: f64,

    /// Currency code (e.g. "SAR")
    pub currency: String,

    /// Mock quality metric, 0-100
    pub ai_score: f64,

    /// Mock internal rate of return, in percent
    pub irr: f64,

    /// Star rating, 1-5
    pub stars: u8,

    /// Hotel category (e.g. "Business Hotel")
    pub hotel_type: String,

    /// Image URLs, first one is the cover
    #[serde(default)]
    pub images: Vec<String>,

    /// Last refresh of the record, as supplied
    #[serde(default)]
    pub last_updated: String,
}

impl HotelListing {
    /// Lowercased text used by free-text matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.city, self.hotel_type).to_lowercase()
    }

    /// Format listing for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{title}`, `{city}`, `{type}`, `{stars}`
    /// - `{price}`, `{currency}`, `{irr}`, `{ai_score}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{title}", &self.title)
            .replace("{city}", &self.city)
            .replace("{type}", &self.hotel_type)
            .replace("{stars}", &self.stars.to_string())
            .replace("{price}", &format!("{:.0}", self.price))
            .replace("{currency}", &self.currency)
            .replace("{irr}", &self.irr.to_string())
            .replace("{ai_score}", &self.ai_score.to_string())
    }
}
