use crate::filters::{codec, FilterCriteria};
use crate::models::Listing;
use crate::sources::traits::ListingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetches listings from a remote listings API
pub struct HttpListingSource {
    client: Client,
    base_url: String,
}

impl HttpListingSource {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Endpoint URL for a given set of criteria
    pub fn listings_url(&self, criteria: &FilterCriteria) -> Result<Url> {
        let endpoint = format!("{}/listings", self.base_url.trim_end_matches('/'));
        codec::listing_url(&endpoint, criteria)
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<Listing>> {
        let url = self.listings_url(criteria)?;
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach listings API")?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            anyhow::bail!("Listings API request failed: {}", response.status());
        }

        let listings: Vec<Listing> = response
            .json()
            .await
            .context("Failed to decode listings response")?;

        info!("Fetched {} listings from API", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
