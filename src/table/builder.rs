use crate::normalize::{normalize, parse_date};
use crate::types::{CanonicalField, Cell, NormalizedRecord, RawRecord};
use tracing::debug;

/// Columns parsed into typed dates once the table is assembled
pub const DATE_COLUMNS: [CanonicalField; 3] = [
    CanonicalField::DocumentDate,
    CanonicalField::RecordingDate,
    CanonicalField::SaleDate,
];

/// Column order analysts expect when browsing the full table
const PREFERRED_ORDER: [CanonicalField; 14] = [
    CanonicalField::DocumentDate,
    CanonicalField::RecordingDate,
    CanonicalField::SaleDate,
    CanonicalField::LoanAmount,
    CanonicalField::LoanType,
    CanonicalField::LienType,
    CanonicalField::InterestRate,
    CanonicalField::LoanTerm,
    CanonicalField::LoanToValue,
    CanonicalField::LenderName,
    CanonicalField::BuyerName,
    CanonicalField::SellerName,
    CanonicalField::DocNumber,
    CanonicalField::SalePrice,
];

/// Normalized records as a table with sparse rows.
///
/// A column exists when at least one kept row resolved that field; a row
/// without a value for it reads as null. Date columns hold `Cell::Date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<CanonicalField>,
    rows: Vec<NormalizedRecord>,
}

impl NormalizedTable {
    /// Normalize every record, drop blank rows and type the date columns
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut table = NormalizedTable::default();

        for record in records {
            let row = normalize(record);
            if row.is_blank() {
                debug!("dropping record with no usable fields");
                continue;
            }
            table.push_row(row);
        }

        for row in table.rows.iter_mut() {
            for column in DATE_COLUMNS {
                type_date_cell(row, column);
            }
        }

        table
    }

    fn push_row(&mut self, row: NormalizedRecord) {
        for field in row.fields.keys() {
            if !self.columns.contains(field) {
                self.columns.push(*field);
            }
        }
        self.rows.push(row);
    }

    /// Columns in order of first appearance
    pub fn columns(&self) -> &[CanonicalField] {
        &self.columns
    }

    /// Present columns, preferred analyst order first, the rest after
    pub fn display_columns(&self) -> Vec<CanonicalField> {
        let mut ordered: Vec<_> = PREFERRED_ORDER
            .into_iter()
            .filter(|field| self.has_column(*field))
            .collect();
        ordered.extend(
            self.columns
                .iter()
                .copied()
                .filter(|field| !PREFERRED_ORDER.contains(field)),
        );
        ordered
    }

    pub fn has_column(&self, field: CanonicalField) -> bool {
        self.columns.contains(&field)
    }

    pub fn rows(&self) -> &[NormalizedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, field: CanonicalField) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(field))
    }
}

/// Build the table for a batch of harvested records
pub fn build_table<'a, I>(records: I) -> NormalizedTable
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    NormalizedTable::build(records)
}

/// Replace a date column's value with a typed date, or null when it won't parse
fn type_date_cell(row: &mut NormalizedRecord, column: CanonicalField) {
    let parsed = match row.fields.get(&column) {
        None => return,
        Some(Cell::Date(_)) => return,
        Some(Cell::Text(text)) => parse_date(text),
        Some(Cell::Number(_)) => None,
    };

    match parsed {
        Some(date) => {
            row.fields.insert(column, Cell::Date(date));
        }
        None => {
            row.fields.remove(&column);
        }
    }
}
