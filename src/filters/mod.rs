pub mod codec;
pub mod criteria;
pub mod local;
pub mod ordering;
pub mod predicate;

pub use codec::ParamBag;
pub use criteria::FilterCriteria;
pub use local::filter_listings;
pub use ordering::NewestFirst;
pub use predicate::{Field, FieldSource, FieldValue, Predicate};
