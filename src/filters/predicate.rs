//! Shared translation from [`FilterCriteria`] to a boolean predicate tree.
//!
//! Every filter back-end consumes the same [`Predicate`]: the local filter
//! evaluates it against records through [`FieldSource`], the SQLite
//! repository compiles it into a `WHERE` clause.

use super::criteria::FilterCriteria;
use crate::models::Listing;

/// Filterable attributes of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Address,
    City,
    Category,
    Status,
    Price,
    Bedrooms,
    Area,
}

/// Fields the free-text search looks at
pub const SEARCH_FIELDS: [Field; 3] = [Field::Title, Field::Description, Field::Address];

/// Value of a field as seen by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
}

/// Read access to the filterable fields of a record
pub trait FieldSource {
    fn field(&self, field: Field) -> FieldValue<'_>;
}

impl FieldSource for Listing {
    fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Title => FieldValue::Text(&self.title),
            Field::Description => FieldValue::Text(&self.description),
            Field::Address => FieldValue::Text(&self.address),
            Field::City => FieldValue::Text(&self.city),
            Field::Category => FieldValue::Text(self.category.as_str()),
            Field::Status => FieldValue::Text(self.status.as_str()),
            Field::Price => FieldValue::Number(self.price),
            Field::Bedrooms => FieldValue::Number(i64::from(self.bedrooms)),
            Field::Area => FieldValue::Number(i64::from(self.area_sqm)),
        }
    }
}

/// Boolean predicate over a record's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Conjunction; empty is always true
    All(Vec<Predicate>),
    /// Disjunction; empty is always false
    Any(Vec<Predicate>),
    /// Exact text equality
    Equals(Field, String),
    /// Case-insensitive containment; the needle is stored folded
    Contains(Field, String),
    /// Inclusive lower bound
    AtLeast(Field, i64),
    /// Inclusive upper bound
    AtMost(Field, i64),
}

/// Case folding shared by the in-memory and persisted comparisons
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

impl Predicate {
    /// Build the predicate for a set of criteria
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut clauses = Vec::new();

        if let Some(search) = criteria.search_text() {
            let needle = fold(search);
            clauses.push(Predicate::Any(
                SEARCH_FIELDS
                    .iter()
                    .map(|f| Predicate::Contains(*f, needle.clone()))
                    .collect(),
            ));
        }
        if let Some(category) = criteria.category {
            clauses.push(Predicate::Equals(
                Field::Category,
                category.as_str().to_string(),
            ));
        }
        if let Some(status) = criteria.status {
            clauses.push(Predicate::Equals(Field::Status, status.as_str().to_string()));
        }

        push_range(&mut clauses, Field::Price, criteria.min_price, criteria.max_price);
        push_range(
            &mut clauses,
            Field::Bedrooms,
            criteria.min_bedrooms,
            criteria.max_bedrooms,
        );
        push_range(&mut clauses, Field::Area, criteria.min_area, criteria.max_area);

        if let Some(city) = criteria.city_text() {
            clauses.push(Predicate::Contains(Field::City, fold(city)));
        }

        Predicate::All(clauses)
    }

    /// Evaluate against a record
    pub fn matches<R: FieldSource + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::All(clauses) => clauses.iter().all(|p| p.matches(record)),
            Predicate::Any(clauses) => clauses.iter().any(|p| p.matches(record)),
            Predicate::Equals(field, expected) => match record.field(*field) {
                FieldValue::Text(value) => value == expected,
                FieldValue::Number(value) => value.to_string() == *expected,
            },
            Predicate::Contains(field, needle) => match record.field(*field) {
                FieldValue::Text(value) => fold(value).contains(needle.as_str()),
                FieldValue::Number(_) => false,
            },
            Predicate::AtLeast(field, bound) => match record.field(*field) {
                FieldValue::Number(value) => value >= *bound,
                FieldValue::Text(_) => false,
            },
            Predicate::AtMost(field, bound) => match record.field(*field) {
                FieldValue::Number(value) => value <= *bound,
                FieldValue::Text(_) => false,
            },
        }
    }

    /// True for the predicate that accepts every record
    pub fn is_trivial(&self) -> bool {
        matches!(self, Predicate::All(clauses) if clauses.is_empty())
    }
}

fn push_range(clauses: &mut Vec<Predicate>, field: Field, min: Option<i64>, max: Option<i64>) {
    if let Some(min) = min {
        clauses.push(Predicate::AtLeast(field, min));
    }
    if let Some(max) = max {
        clauses.push(Predicate::AtMost(field, max));
    }
}
