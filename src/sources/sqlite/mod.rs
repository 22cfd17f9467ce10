//! Listing repository: persistence and filtered queries over SQLite.
//!
//! The repository never opens connections on its own; it is handed a
//! [`SqlitePoolManager`] built at startup.

mod pool;
pub mod query;

pub use pool::SqlitePoolManager;
pub use query::build_search_query;

use crate::error::{Result, StoreError};
use crate::filters::predicate::fold;
use crate::filters::FilterCriteria;
use crate::models::{Amenity, Category, Listing, ListingDraft, ListingStatus, UnknownVariant};
use crate::sources::traits::ListingSource;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use query::LISTING_COLUMNS;
use tracing::{debug, info};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS listings (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        title_folded TEXT NOT NULL,
        description TEXT NOT NULL,
        description_folded TEXT NOT NULL,
        category TEXT NOT NULL,
        status TEXT NOT NULL,
        price INTEGER NOT NULL CHECK (price >= 0),
        bedrooms INTEGER NOT NULL CHECK (bedrooms >= 0),
        area_sqm INTEGER NOT NULL CHECK (area_sqm >= 0),
        address TEXT NOT NULL,
        address_folded TEXT NOT NULL,
        city TEXT NOT NULL,
        city_folded TEXT NOT NULL,
        amenities TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_listings_created_at ON listings(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_listings_category ON listings(category)",
    "CREATE INDEX IF NOT EXISTS idx_listings_status ON listings(status)",
    "CREATE INDEX IF NOT EXISTS idx_listings_price ON listings(price)",
];

/// Row as stored: enums by wire name, amenities as JSON text,
/// timestamps as fixed-width RFC 3339 UTC
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: String,
    title: String,
    description: String,
    category: String,
    status: String,
    price: i64,
    bedrooms: i32,
    area_sqm: i32,
    address: String,
    city: String,
    amenities: String,
    created_at: String,
    updated_at: String,
}

impl ListingRow {
    fn into_listing(self) -> Result<Listing> {
        let row = self;
        let corrupt = |reason: String| StoreError::Corrupt {
            id: row.id.clone(),
            reason,
        };

        let category: Category = row
            .category
            .parse()
            .map_err(|e: UnknownVariant| corrupt(e.to_string()))?;
        let status: ListingStatus = row
            .status
            .parse()
            .map_err(|e: UnknownVariant| corrupt(e.to_string()))?;
        let amenities: Vec<Amenity> = serde_json::from_str(&row.amenities)
            .map_err(|e| corrupt(format!("amenities: {}", e)))?;
        let created_at = decode_timestamp(&row.created_at).map_err(corrupt)?;
        let updated_at = decode_timestamp(&row.updated_at).map_err(corrupt)?;

        Ok(Listing {
            id: row.id,
            title: row.title,
            description: row.description,
            category,
            status,
            price: row.price,
            bedrooms: row.bedrooms,
            area_sqm: row.area_sqm,
            address: row.address,
            city: row.city,
            amenities,
            created_at,
            updated_at,
        })
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("timestamp {:?}: {}", raw, e))
}

/// SQLite-backed listing repository
#[derive(Clone, Debug)]
pub struct ListingRepository {
    pool_manager: SqlitePoolManager,
}

impl ListingRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    /// Create the `listings` table and its indexes if they do not exist
    pub async fn init(&self) -> Result<()> {
        info!("Creating listings table if not exist");
        let pool = self.pool_manager.pool();

        sqlx::query(CREATE_TABLE).execute(pool).await?;
        for statement in CREATE_INDEXES {
            sqlx::query(statement).execute(pool).await?;
        }

        Ok(())
    }

    pub fn pool_manager(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }

    /// Validate and persist a new listing
    pub async fn create(&self, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        let listing = Listing::from_draft(draft);
        self.insert(&listing).await?;
        Ok(listing)
    }

    /// Persist an already-built listing, keeping its id and timestamps
    pub async fn insert(&self, listing: &Listing) -> Result<()> {
        let amenities = serde_json::to_string(&listing.amenities)?;

        sqlx::query(
            r#"
            INSERT INTO listings (
                id, title, title_folded, description, description_folded,
                category, status, price, bedrooms, area_sqm,
                address, address_folded, city, city_folded,
                amenities, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&listing.id)
        .bind(&listing.title)
        .bind(fold(&listing.title))
        .bind(&listing.description)
        .bind(fold(&listing.description))
        .bind(listing.category.as_str())
        .bind(listing.status.as_str())
        .bind(listing.price)
        .bind(listing.bedrooms)
        .bind(listing.area_sqm)
        .bind(&listing.address)
        .bind(fold(&listing.address))
        .bind(&listing.city)
        .bind(fold(&listing.city))
        .bind(amenities)
        .bind(encode_timestamp(&listing.created_at))
        .bind(encode_timestamp(&listing.updated_at))
        .execute(self.pool_manager.pool())
        .await?;

        debug!("Saved listing: id={}, title={}", listing.id, listing.title);
        Ok(())
    }

    /// Replace the mutable attributes of an existing listing
    pub async fn update(&self, id: &str, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        let mut listing = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        listing.update_from(draft);

        self.write_update(&listing).await?;
        debug!("Updated listing {}", listing.id);
        Ok(listing)
    }

    /// Overwrite the stored row for `listing.id`; the row may have been
    /// deleted since it was read
    async fn write_update(&self, listing: &Listing) -> Result<()> {
        let amenities = serde_json::to_string(&listing.amenities)?;
        let result = sqlx::query(
            r#"
            UPDATE listings SET
                title = ?, title_folded = ?, description = ?, description_folded = ?,
                category = ?, status = ?, price = ?, bedrooms = ?, area_sqm = ?,
                address = ?, address_folded = ?, city = ?, city_folded = ?,
                amenities = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&listing.title)
        .bind(fold(&listing.title))
        .bind(&listing.description)
        .bind(fold(&listing.description))
        .bind(listing.category.as_str())
        .bind(listing.status.as_str())
        .bind(listing.price)
        .bind(listing.bedrooms)
        .bind(listing.area_sqm)
        .bind(&listing.address)
        .bind(fold(&listing.address))
        .bind(&listing.city)
        .bind(fold(&listing.city))
        .bind(amenities)
        .bind(encode_timestamp(&listing.updated_at))
        .bind(&listing.id)
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(listing.id.clone()));
        }
        Ok(())
    }

    /// Remove a listing; returns whether a row was deleted
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ?")
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Listing>> {
        let sql = format!("SELECT {} FROM listings WHERE id = ?", LISTING_COLUMNS);
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        row.map(ListingRow::into_listing).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM listings")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }

    /// Listings matching the criteria, newest first
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<Listing>> {
        let mut query = build_search_query(criteria);
        let rows: Vec<ListingRow> = query
            .build_query_as()
            .fetch_all(self.pool_manager.pool())
            .await?;

        let listings = rows
            .into_iter()
            .map(ListingRow::into_listing)
            .collect::<Result<Vec<_>>>()?;

        info!("Retrieved {} listings", listings.len());
        Ok(listings)
    }
}

#[async_trait]
impl ListingSource for ListingRepository {
    async fn fetch(&self, criteria: &FilterCriteria) -> anyhow::Result<Vec<Listing>> {
        Ok(self.search(criteria).await?)
    }

    fn source_name(&self) -> &'static str {
        "sqlite"
    }
}
