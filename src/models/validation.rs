use super::ListingDraft;
use serde::Serialize;
use std::fmt;

/// Upper bound on advertised amenities per listing
pub const MAX_AMENITIES: usize = 8;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures for one write, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.errors.iter().any(|e| e.field == field) {
            return;
        }
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a given field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ListingDraft {
    /// Check the write-path schema
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            errors.add("title", "Title is required");
        } else if title_len > MAX_TITLE_CHARS {
            errors.add(
                "title",
                format!("Title must be at most {} characters", MAX_TITLE_CHARS),
            );
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.add(
                "description",
                format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_CHARS
                ),
            );
        }

        if self.price < 0 {
            errors.add("price", "Price must not be negative");
        }
        if self.bedrooms < 0 {
            errors.add("bedrooms", "Bedrooms must not be negative");
        }
        if self.area_sqm < 0 {
            errors.add("areaSqm", "Area must not be negative");
        }

        if self.address.trim().is_empty() {
            errors.add("address", "Address is required");
        }
        if self.city.trim().is_empty() {
            errors.add("city", "City is required");
        }

        if self.amenities.len() > MAX_AMENITIES {
            errors.add(
                "amenities",
                format!("At most {} amenities are allowed", MAX_AMENITIES),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
