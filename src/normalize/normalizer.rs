use crate::normalize::aliases::ALIAS_TABLE;
use crate::normalize::dates::coerce_date;
use crate::types::{Cell, NormalizedRecord, RawRecord};
use serde_json::Value;

/// Map a harvested record onto the canonical schema.
///
/// Fields without a usable alias are left out rather than set to null.
pub fn normalize(record: &RawRecord) -> NormalizedRecord {
    let mut out = NormalizedRecord::new();

    for (field, aliases) in ALIAS_TABLE.iter() {
        let resolved = aliases
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find(|value| is_usable(value))
            .and_then(Cell::from_value);

        if let Some(cell) = resolved {
            let cell = if field.is_date_like() {
                coerce_date(cell)
            } else {
                cell
            };
            out.insert(*field, cell);
        }
    }

    out
}

/// Null and the empty string never satisfy an alias
fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
