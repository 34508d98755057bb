//! Field normalization - map inconsistent source keys onto one schema
//!
//! Each canonical field has an ordered list of source-key aliases; the
//! first alias holding a usable value wins. Date fields are then coerced
//! to ISO-8601 calendar dates where the text can be read as one.

pub mod aliases;
pub mod dates;
pub mod normalizer;

pub use aliases::{aliases_for, ALIAS_TABLE};
pub use dates::{coerce_date, parse_date};
pub use normalizer::normalize;
