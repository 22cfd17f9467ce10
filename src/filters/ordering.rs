use crate::models::Listing;
use std::cmp::Ordering;

/// The one ordering applied to every listing query: most recently created
/// first, ties broken by ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewestFirst;

impl NewestFirst {
    /// SQL equivalent of [`NewestFirst::compare`], column names of the `listings` table
    pub const ORDER_BY: &'static str = "created_at DESC, id ASC";

    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(&self, listings: &mut [Listing]) {
        listings.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ListingStatus};
    use chrono::{TimeZone, Utc};

    fn listing(id: &str, day: u32) -> Listing {
        let ts = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
        Listing {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            category: Category::House,
            status: ListingStatus::ForSale,
            price: 0,
            bedrooms: 0,
            area_sqm: 0,
            address: String::new(),
            city: String::new(),
            amenities: vec![],
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn newest_first_then_id() {
        let mut listings = vec![listing("b", 1), listing("c", 3), listing("a", 1)];
        NewestFirst.sort(&mut listings);
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
