//! Request handlers for the listings endpoints.
//!
//! Routing and transport belong to whatever HTTP framework hosts these;
//! handlers take already-extracted inputs and return a status code with a
//! JSON body.

use crate::error::StoreError;
use crate::filters::codec;
use crate::models::ListingDraft;
use crate::sources::ListingRepository;
use serde_json::{json, Map, Value};
use tracing::{error, info};

/// Body returned for any failure the caller cannot act on
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Status code and JSON body of a handled request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn internal_error() -> Self {
        Self {
            status: 500,
            body: json!({ "error": GENERIC_ERROR }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `GET /listings?<query>`: filtered listings as a JSON array, newest first
pub async fn list_listings(repo: &ListingRepository, query: &str) -> ApiResponse {
    let criteria = codec::from_query_string(query);

    match repo.search(&criteria).await {
        Ok(listings) => match serde_json::to_value(&listings) {
            Ok(body) => ApiResponse::new(200, body),
            Err(e) => {
                error!("Failed to serialize listings: {}", e);
                ApiResponse::internal_error()
            }
        },
        Err(e) => {
            error!("Listing search failed: {}", e);
            ApiResponse::internal_error()
        }
    }
}

/// `POST /listings`: create a listing, reporting validation failures per field
pub async fn create_listing(repo: &ListingRepository, draft: ListingDraft) -> ApiResponse {
    match repo.create(draft).await {
        Ok(listing) => {
            info!("Created listing {}", listing.id);
            match serde_json::to_value(&listing) {
                Ok(body) => ApiResponse::new(201, body),
                Err(e) => {
                    error!("Failed to serialize listing: {}", e);
                    ApiResponse::internal_error()
                }
            }
        }
        Err(StoreError::Validation(errors)) => {
            let fields: Map<String, Value> = errors
                .errors
                .into_iter()
                .map(|e| (e.field.to_string(), Value::String(e.message)))
                .collect();
            ApiResponse::new(422, json!({ "errors": fields }))
        }
        Err(e) => {
            error!("Listing creation failed: {}", e);
            ApiResponse::internal_error()
        }
    }
}
