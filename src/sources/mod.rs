pub mod http;
pub mod local;
pub mod sqlite;
pub mod traits;

pub use http::HttpListingSource;
pub use local::LocalListingStore;
pub use sqlite::{ListingRepository, SqlitePoolManager};
pub use traits::ListingSource;
