//! Compilation of a [`Predicate`] into SQLite SQL.
//!
//! Values are always bound as parameters. Text containment compares
//! against the `*_folded` shadow columns, which hold the same case folding
//! the in-memory filter applies, so both back-ends agree on non-ASCII text.

use crate::filters::predicate::{Field, Predicate};
use crate::filters::{FilterCriteria, NewestFirst};
use sqlx::{QueryBuilder, Sqlite};

/// Columns selected for a full listing row
pub const LISTING_COLUMNS: &str = "id, title, description, category, status, price, bedrooms, \
     area_sqm, address, city, amenities, created_at, updated_at";

struct Column {
    name: &'static str,
    folded: Option<&'static str>,
    numeric: bool,
}

fn text(name: &'static str, folded: &'static str) -> Column {
    Column {
        name,
        folded: Some(folded),
        numeric: false,
    }
}

fn number(name: &'static str) -> Column {
    Column {
        name,
        folded: None,
        numeric: true,
    }
}

fn column(field: Field) -> Column {
    match field {
        Field::Title => text("title", "title_folded"),
        Field::Description => text("description", "description_folded"),
        Field::Address => text("address", "address_folded"),
        Field::City => text("city", "city_folded"),
        // wire names are already lowercase
        Field::Category => text("category", "category"),
        Field::Status => text("status", "status"),
        Field::Price => number("price"),
        Field::Bedrooms => number("bedrooms"),
        Field::Area => number("area_sqm"),
    }
}

/// `SELECT ... WHERE <criteria> ORDER BY <newest first>`; the `WHERE`
/// clause is left out when nothing is filtered
pub fn build_search_query(criteria: &FilterCriteria) -> QueryBuilder<'static, Sqlite> {
    let predicate = Predicate::from_criteria(criteria);

    let mut query = QueryBuilder::new(format!("SELECT {} FROM listings", LISTING_COLUMNS));
    if !predicate.is_trivial() {
        query.push(" WHERE ");
        push_predicate(&mut query, &predicate);
    }
    query.push(" ORDER BY ");
    query.push(NewestFirst::ORDER_BY);
    query
}

/// Append the SQL form of `predicate`
pub fn push_predicate(query: &mut QueryBuilder<'static, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::All(clauses) => push_group(query, clauses, " AND ", "1 = 1"),
        Predicate::Any(clauses) => push_group(query, clauses, " OR ", "1 = 0"),
        Predicate::Equals(field, value) => {
            query
                .push(column(*field).name)
                .push(" = ")
                .push_bind(value.clone());
        }
        Predicate::Contains(field, needle) => match column(*field).folded {
            Some(folded) => {
                query
                    .push("instr(")
                    .push(folded)
                    .push(", ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            None => {
                query.push("1 = 0");
            }
        },
        Predicate::AtLeast(field, bound) => push_bound(query, *field, " >= ", *bound),
        Predicate::AtMost(field, bound) => push_bound(query, *field, " <= ", *bound),
    }
}

fn push_group(
    query: &mut QueryBuilder<'static, Sqlite>,
    clauses: &[Predicate],
    separator: &str,
    empty: &str,
) {
    if clauses.is_empty() {
        query.push(empty);
        return;
    }

    query.push("(");
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            query.push(separator);
        }
        push_predicate(query, clause);
    }
    query.push(")");
}

fn push_bound(query: &mut QueryBuilder<'static, Sqlite>, field: Field, op: &str, bound: i64) {
    let column = column(field);
    if column.numeric {
        query.push(column.name).push(op).push_bind(bound);
    } else {
        query.push("1 = 0");
    }
}
