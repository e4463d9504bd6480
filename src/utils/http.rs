// src/utils/http.rs

//! HTTP client utilities.

use crate::error::Result;
use crate::models::SearchConfig;

/// Create a configured asynchronous HTTP client.
///
/// The client-wide timeout matches the per-host timeout so a stalled body
/// read cannot outlive a host attempt.
pub fn create_async_client(config: &SearchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.host_timeout())
        .build()?;
    Ok(client)
}
