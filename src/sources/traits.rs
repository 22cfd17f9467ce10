use crate::filters::FilterCriteria;
use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for every place listings can be queried from
/// (local collection, database, remote API)
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Listings matching the criteria, newest first
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<Listing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
