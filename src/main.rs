mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SourceKind};
use listing_scout::api;
use listing_scout::config::AppConfig;
use listing_scout::filters::codec;
use listing_scout::models::Listing;
use listing_scout::sample::sample_drafts;
use listing_scout::sources::{
    HttpListingSource, ListingRepository, ListingSource, LocalListingStore, SqlitePoolManager,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG from it is honoured
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search { source, query } => search(&config, source, &query).await,
        Command::Link { base, query } => {
            let criteria = codec::from_query_string(&query);
            println!("{}", codec::listing_url(&base, &criteria)?);
            Ok(())
        }
        Command::Seed => seed(&config).await,
        Command::Api { query } => {
            let repo = open_repository(&config).await?;
            let response = api::list_listings(&repo, &query).await;
            repo.pool_manager().close().await;

            println!("HTTP {}", response.status);
            println!("{}", serde_json::to_string_pretty(&response.body)?);
            Ok(())
        }
    }
}

async fn open_repository(config: &AppConfig) -> Result<ListingRepository> {
    let pool = SqlitePoolManager::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to open listings database")?;
    let repo = ListingRepository::new(pool);
    let schema = repo.init().await.context("Failed to create listings schema");
    if let Err(e) = schema {
        return release(&repo, Err(e)).await;
    }
    Ok(repo)
}

/// Close the repository's pool, then hand back `result` unchanged
async fn release<T>(repo: &ListingRepository, result: Result<T>) -> Result<T> {
    repo.pool_manager().close().await;
    result
}

async fn search(config: &AppConfig, kind: SourceKind, query: &str) -> Result<()> {
    let criteria = codec::from_query_string(query);
    info!("🏠 Listing Scout");
    info!("Filter: {:?}", codec::encode(&criteria));

    let listings = match kind {
        SourceKind::Local => {
            let store = LocalListingStore::load(&config.store_path).await?;
            fetch_from(&store, &criteria).await?
        }
        SourceKind::Sqlite => {
            let repo = open_repository(config).await?;
            let result = fetch_from(&repo, &criteria).await;
            release(&repo, result).await?
        }
        SourceKind::Http => {
            let client = HttpListingSource::new(&config.api_base_url, config.http_timeout)?;
            fetch_from(&client, &criteria).await?
        }
    };

    print_listings(&listings);
    Ok(())
}

async fn fetch_from<S: ListingSource>(
    source: &S,
    criteria: &listing_scout::FilterCriteria,
) -> Result<Vec<Listing>> {
    info!("Searching {} listings...", source.source_name());
    let listings = source.fetch(criteria).await?;
    info!("✅ Found {} listings", listings.len());
    Ok(listings)
}

fn print_listings(listings: &[Listing]) {
    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} ({} €)", i + 1, listing.title, listing.price);
        println!(
            "   {} · {} · {} hab, {} m²",
            listing.category, listing.status, listing.bedrooms, listing.area_sqm
        );
        println!("   {}, {}", listing.address, listing.city);
        if !listing.amenities.is_empty() {
            let amenities: Vec<&str> = listing.amenities.iter().map(|a| a.as_str()).collect();
            println!("   Amenities: {}", amenities.join(", "));
        }
        println!("   ID: {}", listing.id);
        println!();
    }
}

async fn seed(config: &AppConfig) -> Result<()> {
    let mut store = LocalListingStore::load(&config.store_path).await?;
    let repo = open_repository(config).await?;

    let result = seed_into(&mut store, &repo).await;
    let total = release(&repo, result).await?;

    info!(
        "💾 Seeded {} listings ({} in {})",
        store.len(),
        total,
        config.database_url
    );
    Ok(())
}

async fn seed_into(store: &mut LocalListingStore, repo: &ListingRepository) -> Result<i64> {
    for draft in sample_drafts() {
        let listing = store.create(draft)?;
        repo.insert(&listing).await?;
    }
    store.save().await?;
    Ok(repo.count().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        AppConfig {
            database_url: dir.path().join("listings.db").to_str().unwrap().to_string(),
            store_path: dir.path().join("listings.json"),
            ..AppConfig::default()
        }
    }

    /// Leave a `listings` table behind that `init` accepts but inserts reject
    async fn plant_legacy_table(config: &AppConfig, columns: &str) {
        let pool = SqlitePoolManager::connect(&config.database_url, 1)
            .await
            .expect("Failed to open database");
        sqlx::query(&format!("CREATE TABLE listings ({})", columns))
            .execute(pool.pool())
            .await
            .expect("Failed to create legacy table");
        pool.close().await;
    }

    #[tokio::test]
    async fn release_closes_pool_on_error() {
        let dir = TempDir::new().unwrap();
        let repo = open_repository(&config_in(&dir)).await.unwrap();

        let result = release(&repo, Err::<(), _>(anyhow::anyhow!("insert failed"))).await;
        assert!(result.is_err());
        assert!(repo.pool_manager().is_closed());
    }

    #[tokio::test]
    async fn failed_seed_still_releases_pool() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        plant_legacy_table(
            &config,
            "id TEXT PRIMARY KEY, created_at TEXT, category TEXT, status TEXT, price INTEGER",
        )
        .await;

        let mut store = LocalListingStore::load(&config.store_path).await.unwrap();
        let repo = open_repository(&config).await.unwrap();
        let result = seed_into(&mut store, &repo).await;
        assert!(result.is_err());

        assert!(release(&repo, result).await.is_err());
        assert!(repo.pool_manager().is_closed());
        assert!(!config.store_path.exists());
    }

    #[tokio::test]
    async fn schema_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        plant_legacy_table(&config, "id TEXT PRIMARY KEY").await;

        let err = open_repository(&config).await.unwrap_err();
        assert!(err.to_string().contains("schema"), "unexpected error: {}", err);
    }
}
