use crate::models::{Category, ListingStatus};
use serde::{Deserialize, Serialize};

/// Search parameters for listing queries.
///
/// Every field is optional. An unset field puts no constraint on its
/// dimension; set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text matched against title, description and address
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ListingStatus>,
    /// Minimum price, inclusive
    pub min_price: Option<i64>,
    /// Maximum price, inclusive
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i64>,
    pub max_bedrooms: Option<i64>,
    /// Minimum size in square meters
    pub min_area: Option<i64>,
    /// Maximum size in square meters
    pub max_area: Option<i64>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..self
        }
    }

    pub fn with_category(self, category: Category) -> Self {
        Self {
            category: Some(category),
            ..self
        }
    }

    pub fn with_status(self, status: ListingStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    pub fn with_price(self, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min_price: min,
            max_price: max,
            ..self
        }
    }

    pub fn with_bedrooms(self, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min_bedrooms: min,
            max_bedrooms: max,
            ..self
        }
    }

    pub fn with_area(self, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min_area: min,
            max_area: max,
            ..self
        }
    }

    pub fn with_city(self, city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..self
        }
    }

    /// Free-text search, if set to something other than whitespace
    pub fn search_text(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }

    /// City filter, if set to something other than whitespace
    pub fn city_text(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.search_text().is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && self.max_bedrooms.is_none()
            && self.min_area.is_none()
            && self.max_area.is_none()
            && self.city_text().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
