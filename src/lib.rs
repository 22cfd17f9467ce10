//! Listing search: one filter model, three back-ends.
//!
//! ## Modules
//!
//! - [`models`] – Listing, enums, write payload and its validation
//! - [`filters`] – FilterCriteria, the shared predicate, ordering, local filter, query param codec
//! - [`sources`] – local JSON collection, SQLite repository, HTTP client
//! - [`api`] – list/create endpoint handlers
//! - [`config`] – environment configuration

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod sample;
pub mod sources;

pub use error::StoreError;
pub use filters::{FilterCriteria, NewestFirst, Predicate};
pub use models::{Amenity, Category, Listing, ListingDraft, ListingStatus};
