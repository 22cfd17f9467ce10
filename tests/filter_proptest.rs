//! Generated-input properties of the codec, the local filter and the
//! SQLite query builder.
//!
//! Listings are drawn from small vocabularies so searches, ranges and
//! creation-time ties actually hit.

use chrono::{DateTime, Duration, TimeZone, Utc};
use listing_scout::filters::codec::{self, ParamBag};
use listing_scout::filters::{filter_listings, NewestFirst};
use listing_scout::sources::{ListingRepository, SqlitePoolManager};
use listing_scout::{Category, FilterCriteria, Listing, ListingStatus};
use proptest::prelude::*;
use proptest::sample::select;
use std::cmp::Ordering;
use tempfile::TempDir;

const TITLES: [&str; 6] = [
    "Casa junto al mar",
    "Ático con piscina",
    "Piso reformado",
    "Estudio luminoso",
    "Local comercial",
    "Oficina",
];
const ADDRESSES: [&str; 4] = ["Calle Mar 5", "Avenida Norte 9", "Plaza Mayor 1", "Camino del piso 3"];
const CITIES: [&str; 5] = ["Valencia", "Madrid", "Málaga", "A Coruña", "San Sebastián"];
const SEARCH_TERMS: [&str; 9] = ["mar", "MAR", "ático", "ÁTICO", "piso", "casa", "norte", "  ", "zz"];
const CITY_TERMS: [&str; 6] = ["valencia", "MÁLAGA", "coruña", "san", "  ", "bilbao"];
const PRICES: [i64; 5] = [0, 100_000, 150_000, 250_000, 500_000];

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
}

fn arb_category() -> impl Strategy<Value = Category> {
    select(Category::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = ListingStatus> {
    select(ListingStatus::ALL.to_vec())
}

/// Criteria whose every set field survives encoding
fn arb_wire_criteria() -> impl Strategy<Value = FilterCriteria> {
    let text = select(vec!["mar", "ático luminoso", "casa & jardín", "a+b=c", "50%", " Piso "]);
    let city = select(vec!["Valencia", "A Coruña", "San Sebastián", "l'Hospitalet"]);
    (
        proptest::option::of(text.prop_map(String::from)),
        proptest::option::of(arb_category()),
        proptest::option::of(arb_status()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(city.prop_map(String::from)),
    )
        .prop_map(
            |(search, category, status, min_price, max_price, min_bedrooms, max_bedrooms, min_area, max_area, city)| {
                FilterCriteria {
                    search,
                    category,
                    status,
                    min_price,
                    max_price,
                    min_bedrooms,
                    max_bedrooms,
                    min_area,
                    max_area,
                    city,
                }
            },
        )
}

/// Criteria sized to the generated listings, blanks included
fn arb_filter_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        proptest::option::of(select(SEARCH_TERMS.to_vec()).prop_map(String::from)),
        proptest::option::of(arb_category()),
        proptest::option::of(arb_status()),
        proptest::option::of(-1_000i64..600_000),
        proptest::option::of(-1_000i64..600_000),
        proptest::option::of(-1i64..7),
        proptest::option::of(-1i64..7),
        proptest::option::of(0i64..300),
        proptest::option::of(0i64..300),
        proptest::option::of(select(CITY_TERMS.to_vec()).prop_map(String::from)),
    )
        .prop_map(
            |(search, category, status, min_price, max_price, min_bedrooms, max_bedrooms, min_area, max_area, city)| {
                FilterCriteria {
                    search,
                    category,
                    status,
                    min_price,
                    max_price,
                    min_bedrooms,
                    max_bedrooms,
                    min_area,
                    max_area,
                    city,
                }
            },
        )
}

fn arb_listings() -> impl Strategy<Value = Vec<Listing>> {
    let row = (
        select(TITLES.to_vec()),
        select(TITLES.to_vec()),
        select(ADDRESSES.to_vec()),
        select(CITIES.to_vec()),
        arb_category(),
        arb_status(),
        select(PRICES.to_vec()),
        0i32..6,
        0i32..250,
        0i64..4,
    );
    proptest::collection::vec(row, 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (title, description, address, city, category, status, price, bedrooms, area_sqm, day))| {
                    let created = base_time() + Duration::days(day);
                    Listing {
                        id: format!("l{:02}", i),
                        title: title.to_string(),
                        description: description.to_lowercase(),
                        category,
                        status,
                        price,
                        bedrooms,
                        area_sqm,
                        address: address.to_string(),
                        city: city.to_string(),
                        amenities: Vec::new(),
                        created_at: created,
                        updated_at: created,
                    }
                },
            )
            .collect()
    })
}

fn arb_param_bag() -> impl Strategy<Value = ParamBag> {
    let keys = select(vec![
        "search", "category", "status", "minPrice", "maxPrice", "minBedrooms", "maxBedrooms",
        "minArea", "maxArea", "city", "page",
    ]);
    let values = select(vec![
        "", "  ", "12", "-3", " 40 ", "1.5", "1e3", "NaN", "abc", "house", "for_rent", "HOUSE",
        "Valencia", "ático",
    ]);
    proptest::collection::btree_map(keys.prop_map(String::from), values.prop_map(String::from), 0..8)
}

/// Straightforward restatement of the filter rules
fn expected_match(listing: &Listing, criteria: &FilterCriteria) -> bool {
    let contains = |hay: &str, needle: &str| hay.to_lowercase().contains(&needle.to_lowercase());
    let within = |value: i64, min: Option<i64>, max: Option<i64>| {
        min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
    };

    criteria.search_text().map_or(true, |s| {
        contains(&listing.title, s) || contains(&listing.description, s) || contains(&listing.address, s)
    }) && criteria.category.map_or(true, |c| listing.category == c)
        && criteria.status.map_or(true, |s| listing.status == s)
        && within(listing.price, criteria.min_price, criteria.max_price)
        && within(i64::from(listing.bedrooms), criteria.min_bedrooms, criteria.max_bedrooms)
        && within(i64::from(listing.area_sqm), criteria.min_area, criteria.max_area)
        && criteria.city_text().map_or(true, |c| contains(&listing.city, c))
}

fn ids(listings: &[Listing]) -> Vec<String> {
    listings.iter().map(|l| l.id.clone()).collect()
}

fn is_newest_first(listings: &[Listing]) -> bool {
    listings
        .windows(2)
        .all(|pair| NewestFirst.compare(&pair[0], &pair[1]) == Ordering::Less)
}

async fn search_in_sqlite(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("listings.db");
    let pool = SqlitePoolManager::connect(path.to_str().unwrap(), 1)
        .await
        .expect("Failed to open database");
    let repo = ListingRepository::new(pool);
    repo.init().await.expect("Failed to create schema");

    for listing in listings {
        repo.insert(listing).await.expect("Failed to insert listing");
    }
    let found = repo.search(criteria).await.expect("Failed to search");
    repo.pool_manager().close().await;
    found
}

proptest! {
    /// Set fields survive encode then decode, in a bag and in a query string
    #[test]
    fn criteria_survive_the_codec(criteria in arb_wire_criteria()) {
        prop_assert_eq!(codec::decode(&codec::encode(&criteria)), criteria.clone());
        prop_assert_eq!(
            codec::from_query_string(&codec::to_query_string(&criteria)),
            criteria
        );
    }

    /// Encoding what was decoded from an encoding changes nothing
    #[test]
    fn encoding_is_idempotent(criteria in arb_filter_criteria()) {
        let once = codec::encode(&criteria);
        let twice = codec::encode(&codec::decode(&once));
        prop_assert_eq!(twice, once);
    }

    /// Whatever a bag holds, decoding settles after one pass
    #[test]
    fn decoding_arbitrary_bags_is_stable(params in arb_param_bag()) {
        let decoded = codec::decode(&params);
        prop_assert_eq!(codec::decode(&codec::encode(&decoded)), decoded);
    }

    /// A listing is returned exactly when it satisfies every set field
    #[test]
    fn filter_is_the_conjunction_of_set_fields(
        listings in arb_listings(),
        criteria in arb_filter_criteria(),
    ) {
        let result = filter_listings(&listings, &criteria);

        let mut expected: Vec<String> = listings
            .iter()
            .filter(|l| expected_match(l, &criteria))
            .map(|l| l.id.clone())
            .collect();
        let mut actual = ids(&result);
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
        prop_assert!(is_newest_first(&result));
    }

    /// No criteria returns everything, newest first
    #[test]
    fn empty_criteria_keeps_every_listing(listings in arb_listings()) {
        let result = filter_listings(&listings, &FilterCriteria::new());
        prop_assert_eq!(result.len(), listings.len());
        prop_assert!(is_newest_first(&result));
    }

    /// Equal min and max select exactly that price
    #[test]
    fn equal_bounds_select_exact_price(listings in arb_listings(), price in select(PRICES.to_vec())) {
        let result = filter_listings(&listings, &FilterCriteria::new().with_price(Some(price), Some(price)));
        let expected = listings.iter().filter(|l| l.price == price).count();
        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.iter().all(|l| l.price == price));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The SQLite query and the in-memory filter return the same listings in the same order
    #[test]
    fn sqlite_agrees_with_local_filter(
        listings in arb_listings(),
        criteria in arb_filter_criteria(),
    ) {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to start runtime");
        let remote = runtime.block_on(search_in_sqlite(&listings, &criteria));
        let local = filter_listings(&listings, &criteria);
        prop_assert_eq!(ids(&remote), ids(&local));
    }
}
