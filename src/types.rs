use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A record-like object exactly as it appears in the source document
pub type RawRecord = Map<String, Value>;

/// The fixed set of normalized output columns.
///
/// Variant order is the canonical column order used when a field is
/// resolved, so a `BTreeMap<CanonicalField, _>` iterates in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    DocumentDate,
    RecordingDate,
    RecordType,
    SalePrice,
    DeedType,
    LoanAmount,
    LoanType,
    LienType,
    InterestRate,
    LoanTerm,
    LoanToValue,
    DocNumber,
    LenderName,
    BuyerName,
    SellerName,
    SaleDate,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 16] = [
        CanonicalField::DocumentDate,
        CanonicalField::RecordingDate,
        CanonicalField::RecordType,
        CanonicalField::SalePrice,
        CanonicalField::DeedType,
        CanonicalField::LoanAmount,
        CanonicalField::LoanType,
        CanonicalField::LienType,
        CanonicalField::InterestRate,
        CanonicalField::LoanTerm,
        CanonicalField::LoanToValue,
        CanonicalField::DocNumber,
        CanonicalField::LenderName,
        CanonicalField::BuyerName,
        CanonicalField::SellerName,
        CanonicalField::SaleDate,
    ];

    /// Column name used in exports
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::DocumentDate => "documentDate",
            CanonicalField::RecordingDate => "recordingDate",
            CanonicalField::RecordType => "recordType",
            CanonicalField::SalePrice => "salePrice",
            CanonicalField::DeedType => "deedType",
            CanonicalField::LoanAmount => "loanAmount",
            CanonicalField::LoanType => "loanType",
            CanonicalField::LienType => "lienType",
            CanonicalField::InterestRate => "interestRate",
            CanonicalField::LoanTerm => "loanTerm",
            CanonicalField::LoanToValue => "loanToValue",
            CanonicalField::DocNumber => "docNumber",
            CanonicalField::LenderName => "lenderName",
            CanonicalField::BuyerName => "buyerName",
            CanonicalField::SellerName => "sellerName",
            CanonicalField::SaleDate => "saleDate",
        }
    }

    /// Whether resolved values of this field go through date coercion
    pub fn is_date_like(self) -> bool {
        crate::harvest::vocabulary::DATE_KEYS.contains(self.name())
            || self.name().to_ascii_lowercase().ends_with("date")
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One non-null value in a normalized row.
///
/// Null is represented by absence, so every exported value is a string,
/// a number, a date rendered as `YYYY-MM-DD`, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Number),
    Date(NaiveDate),
}

impl Cell {
    /// Convert a raw JSON value. Booleans and nested structures are kept
    /// as their JSON text; null has no cell.
    pub fn from_value(value: &Value) -> Option<Cell> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Cell::Text(s.clone())),
            Value::Number(n) => Some(Cell::Number(n.clone())),
            Value::Bool(b) => Some(Cell::Text(b.to_string())),
            Value::Array(_) | Value::Object(_) => Some(Cell::Text(value.to_string())),
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// True when the string form of the value is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Number(n) => Value::Number(n.clone()),
            Cell::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A record mapped onto the canonical schema. Only resolved fields are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    pub fields: BTreeMap<CanonicalField, Cell>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&Cell> {
        self.fields.get(&field)
    }

    pub fn insert(&mut self, field: CanonicalField, cell: Cell) {
        self.fields.insert(field, cell);
    }

    /// Every resolved value is blank (or nothing resolved at all)
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(Cell::is_blank)
    }
}

/// Configuration for the extraction pipeline
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Deepest nesting level the harvester will walk (root = 0).
    /// Anything deeper is reported as an error rather than skipped.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig { max_depth: 128 }
    }
}
