use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

mod validation;

pub use validation::{FieldError, ValidationErrors, MAX_AMENITIES};

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    House,
    Apartment,
    Studio,
    Office,
    Commercial,
    Land,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::House,
        Category::Apartment,
        Category::Studio,
        Category::Office,
        Category::Commercial,
        Category::Land,
    ];

    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::House => "house",
            Category::Apartment => "apartment",
            Category::Studio => "studio",
            Category::Office => "office",
            Category::Commercial => "commercial",
            Category::Land => "land",
        }
    }
}

/// Commercial state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
    Reserved,
    Sold,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::ForSale,
        ListingStatus::ForRent,
        ListingStatus::Reserved,
        ListingStatus::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for_sale",
            ListingStatus::ForRent => "for_rent",
            ListingStatus::Reserved => "reserved",
            ListingStatus::Sold => "sold",
        }
    }
}

/// Amenities a property can advertise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Pool,
    Garage,
    Garden,
    Elevator,
    Terrace,
    AirConditioning,
    Furnished,
    StorageRoom,
}

impl Amenity {
    pub const ALL: [Amenity; 8] = [
        Amenity::Pool,
        Amenity::Garage,
        Amenity::Garden,
        Amenity::Elevator,
        Amenity::Terrace,
        Amenity::AirConditioning,
        Amenity::Furnished,
        Amenity::StorageRoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Pool => "pool",
            Amenity::Garage => "garage",
            Amenity::Garden => "garden",
            Amenity::Elevator => "elevator",
            Amenity::Terrace => "terrace",
            Amenity::AirConditioning => "air_conditioning",
            Amenity::Furnished => "furnished",
            Amenity::StorageRoom => "storage_room",
        }
    }
}

/// Error returned when a string is not part of a closed value set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for ListingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListingStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl FromStr for Amenity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amenity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "amenity",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: ListingStatus,
    pub price: i64,
    pub bedrooms: i32,
    pub area_sqm: i32,
    pub address: String,
    pub city: String,
    pub amenities: Vec<Amenity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write payload for creating or replacing a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub status: ListingStatus,
    pub price: i64,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub area_sqm: i32,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

/// Current time at the precision listings are persisted with
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Listing {
    /// Build a new listing from a validated draft, stamping id and timestamps
    pub fn from_draft(draft: ListingDraft) -> Self {
        let created_at = now();
        let mut listing = Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            description: String::new(),
            category: draft.category,
            status: draft.status,
            price: 0,
            bedrooms: 0,
            area_sqm: 0,
            address: String::new(),
            city: String::new(),
            amenities: Vec::new(),
            created_at,
            updated_at: created_at,
        };
        listing.apply(draft);
        listing
    }

    /// Replace every mutable attribute and refresh `updated_at`
    pub fn update_from(&mut self, draft: ListingDraft) {
        self.apply(draft);
        self.updated_at = now().max(self.created_at);
    }

    fn apply(&mut self, draft: ListingDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.category = draft.category;
        self.status = draft.status;
        self.price = draft.price;
        self.bedrooms = draft.bedrooms;
        self.area_sqm = draft.area_sqm;
        self.address = draft.address;
        self.city = draft.city;
        self.amenities = normalize_amenities(draft.amenities);
    }
}

/// Sort and deduplicate amenities so stored sets compare equal
fn normalize_amenities(mut amenities: Vec<Amenity>) -> Vec<Amenity> {
    amenities.sort();
    amenities.dedup();
    amenities
}
