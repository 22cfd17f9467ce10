use super::criteria::FilterCriteria;
use super::ordering::NewestFirst;
use super::predicate::Predicate;
use crate::models::Listing;
use tracing::debug;

/// Filter an in-memory collection.
///
/// The input is left untouched; matches are cloned into a new vector and
/// ordered newest first. No match yields an empty vector.
pub fn filter_listings(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let predicate = Predicate::from_criteria(criteria);

    let mut matched: Vec<Listing> = listings
        .iter()
        .filter(|listing| predicate.matches(*listing))
        .cloned()
        .collect();

    NewestFirst.sort(&mut matched);

    debug!(
        "Local filter kept {} of {} listings",
        matched.len(),
        listings.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, Category, ListingStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn listing(
        id: &str,
        title: &str,
        category: Category,
        price: i64,
        city: &str,
        age_days: i64,
    ) -> Listing {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() - Duration::days(age_days);
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} en {}", title, city),
            category,
            status: ListingStatus::ForSale,
            price,
            bedrooms: 2,
            area_sqm: 80,
            address: format!("Calle {}", id),
            city: city.to_string(),
            amenities: vec![Amenity::Elevator],
            created_at: created,
            updated_at: created,
        }
    }

    fn collection() -> Vec<Listing> {
        vec![
            listing("1", "Casa junto al mar", Category::House, 100_000, "Valencia", 3),
            listing("2", "Apartamento céntrico", Category::Apartment, 250_000, "Madrid", 1),
            listing("3", "Oficina amplia", Category::Office, 500_000, "Valencia", 2),
        ]
    }

    #[test]
    fn empty_criteria_returns_everything_newest_first() {
        let all = collection();
        let result = filter_listings(&all, &FilterCriteria::new());
        let ids: Vec<&str> = result.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(all[0].id, "1");
    }

    #[test]
    fn price_range_is_inclusive() {
        let all = collection();
        let result = filter_listings(&all, &FilterCriteria::new().with_price(Some(150_000), Some(300_000)));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price, 250_000);

        let exact = filter_listings(&all, &FilterCriteria::new().with_price(Some(500_000), Some(500_000)));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "3");
    }

    #[test]
    fn search_and_city_are_case_insensitive() {
        let all = collection();
        let by_search = filter_listings(&all, &FilterCriteria::new().with_search("mar"));
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].id, "1");

        let by_city = filter_listings(&all, &FilterCriteria::new().with_city("valencia"));
        let ids: Vec<&str> = by_city.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let all = collection();
        let criteria = FilterCriteria::new()
            .with_city("valencia")
            .with_category(Category::Office);
        let result = filter_listings(&all, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "3");

        let none = filter_listings(&all, &criteria.with_price(None, Some(1)));
        assert!(none.is_empty());
    }
}
