//! Listing record in the shape returned by the hosted search API.
//!
//! Demo records are converted into this shape so callers of the search
//! service only ever see one listing type regardless of the data source.

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::models::HotelListing;
use crate::utils::encode_component;

/// Fallback location label when a listing carries no city.
pub const DEFAULT_COUNTRY: &str = "Saudi Arabia";

/// Decode an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_l1: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationLevel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub l1: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeographyLevel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Geography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level1: Option<GeographyLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverPhoto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// A property listing as the search API describes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchListing {
    #[serde(rename = "title_l1", default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub location: Location,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_level1: Option<LocationLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<Geography>,

    /// Built-up area in square metres
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_area: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub baths: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<CoverPhoto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_categories: Option<Vec<Category>>,

    /// Promotion tier ("hot", "superhot")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnishing_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SearchListing {
    /// Best available city name, falling back to the country.
    pub fn city_name(&self) -> &str {
        let non_empty = |name: &&str| !name.is_empty();
        self.geography
            .as_ref()
            .and_then(|g| g.level1.as_ref())
            .map(|level| level.name.as_str())
            .filter(non_empty)
            .or_else(|| {
                self.location_level1
                    .as_ref()
                    .map(|l| l.l1.as_str())
                    .filter(non_empty)
            })
            .or_else(|| self.location.l1.as_deref().filter(non_empty))
            .unwrap_or(DEFAULT_COUNTRY)
    }

    /// Cover image URL, or a placeholder labelled with the title.
    pub fn image_url(&self) -> String {
        match &self.cover_photo {
            Some(photo) if !photo.url.is_empty() => photo.url.clone(),
            _ => {
                let label = if self.title.is_empty() {
                    "Hotel"
                } else {
                    self.title.as_str()
                };
                placeholder_image(label)
            }
        }
    }
}

impl From<&HotelListing> for SearchListing {
    fn from(hotel: &HotelListing) -> Self {
        let digest = Sha256::digest(hotel.id.as_bytes());

        let cover_url = hotel
            .images
            .first()
            .filter(|url| !url.is_empty())
            .cloned()
            .unwrap_or_else(|| placeholder_image(&hotel.title));

        let product = if hotel.ai_score > 90.0 {
            Some("superhot".to_string())
        } else if hotel.ai_score > 75.0 {
            Some("hot".to_string())
        } else {
            None
        };

        Self {
            title: hotel.title.clone(),
            price: hotel.price,
            location: Location {
                l1: Some(hotel.city.clone()),
                slug_l1: None,
            },
            location_level1: Some(LocationLevel {
                l1: hotel.city.clone(),
            }),
            geography: Some(Geography {
                level1: Some(GeographyLevel {
                    slug: city_slug(&hotel.city),
                    name: hotel.city.clone(),
                }),
            }),
            area: f64::from(stable_in_range(&digest, 0, 2000, 3000)),
            plot_area: Some(f64::from(stable_in_range(&digest, 1, 2500, 3500))),
            rooms: stable_in_range(&digest, 2, 50, 150),
            baths: stable_in_range(&digest, 3, 60, 160),
            cover_photo: Some(CoverPhoto { url: cover_url }),
            slug: Some(hotel.id.clone()),
            additional_categories: Some(vec![Category {
                slug: "hotels".to_string(),
            }]),
            product,
            furnishing_status: Some("furnished".to_string()),
            description: Some(format!(
                "{} in {} with {} star rating and AI score of {}. IRR of {}%.",
                hotel.hotel_type, hotel.city, hotel.stars, hotel.ai_score, hotel.irr
            )),
        }
    }
}

/// Lowercase a city and replace everything outside `[a-z0-9]` with `-`.
pub fn city_slug(city: &str) -> String {
    city.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn placeholder_image(label: &str) -> String {
    format!(
        "/placeholder.svg?height=300&width=400&text={}",
        encode_component(label)
    )
}

/// Derive a value in `[low, low + span)` from four bytes of the digest.
fn stable_in_range(digest: &[u8], slot: usize, low: u32, span: u32) -> u32 {
    let start = slot * 4;
    let bytes: [u8; 4] = digest[start..start + 4]
        .try_into()
        .unwrap_or([0; 4]);
    low + u32::from_be_bytes(bytes) % span
}
