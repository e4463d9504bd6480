// src/services/catalog.rs

//! Demo listing catalog.
//!
//! Reads the static JSON dataset once and keeps it in memory for the life of
//! the catalog.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;

use crate::error::{AppError, Result};
use crate::models::HotelListing;

/// In-memory view of the demo dataset.
#[derive(Debug)]
pub struct HotelCatalog {
    path: PathBuf,
    hotels: OnceCell<Vec<HotelListing>>,
}

impl HotelCatalog {
    /// Create a catalog backed by the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hotels: OnceCell::new(),
        }
    }

    /// Create a catalog that is already populated.
    pub fn from_hotels(hotels: Vec<HotelListing>) -> Self {
        Self {
            path: PathBuf::new(),
            hotels: OnceCell::new_with(Some(hotels)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, reading the file only on first use.
    ///
    /// Failed reads are not memoised, so a later call retries.
    pub async fn load(&self) -> Result<&[HotelListing]> {
        let hotels = self
            .hotels
            .get_or_try_init(|| async {
                log::info!("Loading hotel data from {}", self.path.display());
                let hotels = read_hotels(&self.path).await.inspect_err(|e| {
                    log::error!("Error loading hotel data from {}: {}", self.path.display(), e);
                })?;
                log::info!("Loaded {} hotels", hotels.len());
                Ok::<_, AppError>(hotels)
            })
            .await?;
        Ok(hotels.as_slice())
    }

    /// Load the dataset, degrading to an empty slice on failure.
    pub async fn load_or_empty(&self) -> &[HotelListing] {
        self.load().await.unwrap_or(&[])
    }
}

async fn read_hotels(path: &Path) -> Result<Vec<HotelListing>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Distinct values of a field, sorted ascending.
pub fn unique_values<T, F>(hotels: &[HotelListing], field: F) -> Vec<T>
where
    T: Ord,
    F: Fn(&HotelListing) -> T,
{
    let mut values: Vec<T> = hotels.iter().map(field).collect();
    values.sort();
    values.dedup();
    values
}

pub fn unique_cities(hotels: &[HotelListing]) -> Vec<String> {
    unique_values(hotels, |h| h.city.clone())
}

pub fn unique_hotel_types(hotels: &[HotelListing]) -> Vec<String> {
    unique_values(hotels, |h| h.hotel_type.clone())
}
