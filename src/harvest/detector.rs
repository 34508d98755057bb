use crate::harvest::vocabulary::{LOAN_KEYS, SALE_KEYS};
use crate::types::RawRecord;

/// Check if an object looks like a loan or sale record.
///
/// True when at least one of its keys belongs to either vocabulary.
pub fn is_record_like(obj: &RawRecord) -> bool {
    obj.keys()
        .any(|key| LOAN_KEYS.contains(key.as_str()) || SALE_KEYS.contains(key.as_str()))
}
