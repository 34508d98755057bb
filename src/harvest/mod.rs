//! Record harvesting - find loan and sale records anywhere in a document
//!
//! Upstream responses have no fixed shape, so records are recognised by
//! their keys rather than by where they sit. The detector decides whether
//! a single object looks like a record; the harvester walks the whole
//! document and collects every object the detector accepts.

pub mod vocabulary;
pub mod detector;
pub mod harvester;

pub use detector::is_record_like;
pub use harvester::{harvest, RecordHarvester};
pub use vocabulary::{DATE_KEYS, LOAN_KEYS, SALE_KEYS};
