//! Conversion between [`FilterCriteria`] and flat string parameters.
//!
//! Encoding is sparse: only populated fields are written. Decoding is
//! lenient: unknown keys, blank values, non-numeric bounds and values
//! outside a closed enum set are all treated as absent. Numeric bounds
//! that are not integers are rounded inward, so a bound never admits a
//! value the raw number would have excluded.

use super::criteria::FilterCriteria;
use crate::models::{Category, ListingStatus};
use anyhow::{Context, Result};
use reqwest::Url;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Flat string-keyed parameters, as found in a URL query
pub type ParamBag = BTreeMap<String, String>;

pub const SEARCH: &str = "search";
pub const CATEGORY: &str = "category";
pub const STATUS: &str = "status";
pub const MIN_PRICE: &str = "minPrice";
pub const MAX_PRICE: &str = "maxPrice";
pub const MIN_BEDROOMS: &str = "minBedrooms";
pub const MAX_BEDROOMS: &str = "maxBedrooms";
pub const MIN_AREA: &str = "minArea";
pub const MAX_AREA: &str = "maxArea";
pub const CITY: &str = "city";

/// Write the populated fields of `criteria` into a parameter bag
pub fn encode(criteria: &FilterCriteria) -> ParamBag {
    let mut params = ParamBag::new();

    if let Some(search) = criteria.search_text() {
        params.insert(SEARCH.to_string(), search.to_string());
    }
    if let Some(category) = criteria.category {
        params.insert(CATEGORY.to_string(), category.as_str().to_string());
    }
    if let Some(status) = criteria.status {
        params.insert(STATUS.to_string(), status.as_str().to_string());
    }

    insert_number(&mut params, MIN_PRICE, criteria.min_price);
    insert_number(&mut params, MAX_PRICE, criteria.max_price);
    insert_number(&mut params, MIN_BEDROOMS, criteria.min_bedrooms);
    insert_number(&mut params, MAX_BEDROOMS, criteria.max_bedrooms);
    insert_number(&mut params, MIN_AREA, criteria.min_area);
    insert_number(&mut params, MAX_AREA, criteria.max_area);

    if let Some(city) = criteria.city_text() {
        params.insert(CITY.to_string(), city.to_string());
    }

    params
}

/// Rebuild criteria from a parameter bag, dropping anything unusable
pub fn decode(params: &ParamBag) -> FilterCriteria {
    FilterCriteria {
        search: text(params, SEARCH),
        category: closed_set::<Category>(params, CATEGORY),
        status: closed_set::<ListingStatus>(params, STATUS),
        min_price: bound(params, MIN_PRICE, Side::Lower),
        max_price: bound(params, MAX_PRICE, Side::Upper),
        min_bedrooms: bound(params, MIN_BEDROOMS, Side::Lower),
        max_bedrooms: bound(params, MAX_BEDROOMS, Side::Upper),
        min_area: bound(params, MIN_AREA, Side::Lower),
        max_area: bound(params, MAX_AREA, Side::Upper),
        city: text(params, CITY),
    }
}

/// Percent-encoded `key=value&...` form of the criteria, without a leading `?`
pub fn to_query_string(criteria: &FilterCriteria) -> String {
    let params = encode(criteria);
    if params.is_empty() {
        return String::new();
    }

    let mut scratch = scratch_url();
    scratch.query_pairs_mut().extend_pairs(params.iter());
    scratch.query().unwrap_or_default().to_string()
}

/// Parse a query string, with or without a leading `?`, into a parameter bag.
///
/// Repeated keys keep their last value.
pub fn parse_query_string(query: &str) -> ParamBag {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut scratch = scratch_url();
    scratch.set_query(Some(query));
    scratch
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Decode criteria straight from a query string
pub fn from_query_string(query: &str) -> FilterCriteria {
    decode(&parse_query_string(query))
}

/// Shareable link: `base` with the encoded criteria as its query
pub fn listing_url(base: &str, criteria: &FilterCriteria) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    let query = to_query_string(criteria);
    url.set_query(if query.is_empty() { None } else { Some(&query) });
    Ok(url)
}

fn scratch_url() -> Url {
    Url::parse("http://localhost/").expect("static URL parses")
}

fn insert_number<N: ToString>(params: &mut ParamBag, key: &str, value: Option<N>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.to_string());
    }
}

fn text(params: &ParamBag, key: &str) -> Option<String> {
    params
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .cloned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
}

/// Parse an inclusive bound. Integers are taken as-is; other finite
/// numbers (`150000.5`, `1e5`) round up for a lower bound and down for an
/// upper one, saturating at the `i64` range.
fn bound(params: &ParamBag, key: &str, side: Side) -> Option<i64> {
    let raw = params.get(key)?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let rounded = match side {
                Side::Lower => value.ceil(),
                Side::Upper => value.floor(),
            };
            // float to int casts saturate
            Some(rounded as i64)
        }
        _ => {
            debug!("Ignoring malformed number {}={:?}", key, raw);
            None
        }
    }
}

fn closed_set<T: FromStr>(params: &ParamBag, key: &str) -> Option<T> {
    let raw = params.get(key)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring unknown {} value {:?}", key, raw);
            None
        }
    }
}
