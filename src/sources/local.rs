use crate::error::{Result, StoreError};
use crate::filters::{filter_listings, FilterCriteria};
use crate::models::{Listing, ListingDraft};
use crate::sources::traits::ListingSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Listing collection held in memory and persisted as a JSON array on disk.
///
/// One owner at a time; writes go to memory and reach disk on [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct LocalListingStore {
    path: PathBuf,
    listings: Vec<Listing>,
}

impl LocalListingStore {
    /// Open the collection at `path`; a missing file is an empty collection
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let listings = match tokio::fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No local store at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let store = Self { path, listings };
        info!(
            "Loaded {} listings from {}",
            store.listings.len(),
            store.path.display()
        );
        Ok(store)
    }

    /// Write the whole collection back to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&self.listings)?;
        tokio::fs::write(&self.path, json).await?;
        info!(
            "💾 Saved {} listings to {}",
            self.listings.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// All listings in insertion order
    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn create(&mut self, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        let listing = Listing::from_draft(draft);
        self.listings.push(listing.clone());
        debug!("Created local listing {}", listing.id);
        Ok(listing)
    }

    pub fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        let listing = self
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        listing.update_from(draft);
        Ok(listing.clone())
    }

    /// Remove a listing; returns whether anything was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.listings.len();
        self.listings.retain(|l| l.id != id);
        before != self.listings.len()
    }

    /// Listings matching the criteria, newest first
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Listing> {
        filter_listings(&self.listings, criteria)
    }
}

#[async_trait]
impl ListingSource for LocalListingStore {
    async fn fetch(&self, criteria: &FilterCriteria) -> anyhow::Result<Vec<Listing>> {
        Ok(self.filter(criteria))
    }

    fn source_name(&self) -> &'static str {
        "local"
    }
}
