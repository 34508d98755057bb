//! # Loanscope - loan and sale history extraction
//!
//! Pulls loan and sale records out of property-history JSON whose shape is
//! not known in advance, and flattens them into a table with one fixed set
//! of columns plus a short loan summary.
//!
//! ## Modules
//!
//! - **harvest**: find record-like objects at any depth of a document
//! - **normalize**: resolve field aliases and coerce dates
//! - **table**: build the normalized table, the loan summary and exports
//!
//! ## Quick Start
//!
//! ```rust
//! use loanscope::{extract_history, HistoryConfig};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = json!({
//!     "property": {
//!         "salehistory": [{
//!             "amountLoan": 250000,
//!             "loanTypeCode": "CONV",
//!             "lender1": "Acme Bank",
//!             "saleTransDate": "2019-07-01"
//!         }]
//!     }
//! });
//!
//! let report = extract_history(&data, &HistoryConfig::default())?;
//!
//! assert_eq!(report.table.len(), 1);
//! assert_eq!(report.focus.rows()[0].year, Some(2019));
//! assert_eq!(report.focus.rows()[0].loan_type.as_deref(), Some("Conventional"));
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::Read;
use tracing::info;

pub mod error;
pub mod harvest;
pub mod normalize;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HistoryError, Result};
pub use harvest::{harvest, is_record_like, RecordHarvester};
pub use normalize::normalize;
pub use table::{
    build_focus_view, build_table, ExportFormat, FocusColumn, FocusFilter, FocusRow, FocusView,
    NormalizedTable, TableWriter, Tabular,
};
pub use types::{CanonicalField, Cell, HistoryConfig, NormalizedRecord, RawRecord};

/// Everything extracted from one document
#[derive(Debug, Clone)]
pub struct HistoryReport {
    /// Number of record-like objects found before normalization
    pub records_harvested: usize,
    pub table: NormalizedTable,
    pub focus: FocusView,
}

/// Headline counts for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub records_harvested: usize,
    pub parsed_records: usize,
    pub loan_rows: usize,
}

impl HistoryReport {
    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            records_harvested: self.records_harvested,
            parsed_records: self.table.len(),
            loan_rows: self.focus.len(),
        }
    }
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} loan rows in {} parsed records",
            self.loan_rows, self.parsed_records
        )
    }
}

/// Main entry point: run the whole pipeline over one parsed document
pub fn extract_history(value: &Value, config: &HistoryConfig) -> Result<HistoryReport> {
    let harvester = RecordHarvester::new(config.clone());
    let records = harvester.harvest(value)?;

    let table = build_table(records.iter().copied());
    let focus = build_focus_view(&table);

    info!(
        harvested = records.len(),
        parsed = table.len(),
        loan_rows = focus.len(),
        "extracted history"
    );

    Ok(HistoryReport {
        records_harvested: records.len(),
        table,
        focus,
    })
}

/// Parse a JSON document from `reader`, then run the pipeline over it
pub fn extract_history_reader<R: Read>(reader: R, config: &HistoryConfig) -> Result<HistoryReport> {
    let value: Value = serde_json::from_reader(reader)?;
    extract_history(&value, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_extraction() {
        let input = json!({
            "status": {"code": 0},
            "property": [{
                "address": {"line1": "1 Main St"},
                "saleHistory": [
                    {"saleAmount": 410000, "saleTransDate": "2021-04-15", "buyerName": "Doe"},
                    {"saleAmount": 300000, "saleTransDate": "2016-02-01"}
                ],
                "mortgageHistory": [
                    {"lender": "Acme Bank", "loanType": "FHA", "recordingDate": "2021-04-20"}
                ]
            }]
        });

        let report = extract_history(&input, &HistoryConfig::default()).unwrap();

        assert_eq!(report.records_harvested, 3);
        assert_eq!(report.table.len(), 3);
        // saleDate is the best column; the mortgage row has none
        assert_eq!(report.focus.len(), 1);
        assert_eq!(report.focus.rows()[0].lender_name.as_deref(), Some("Acme Bank"));
        assert_eq!(report.focus.rows()[0].purchase_date, None);
    }

    #[test]
    fn test_summary() {
        let input = json!([
            {"lender": "Acme", "recordingDate": "2020-01-01"},
            {"salePrice": 1}
        ]);

        let report = extract_history(&input, &HistoryConfig::default()).unwrap();
        let summary = report.summary();

        assert_eq!(summary.parsed_records, 2);
        assert_eq!(summary.loan_rows, 1);
        assert_eq!(summary.to_string(), "Found 1 loan rows in 2 parsed records");
    }

    #[test]
    fn test_reader_rejects_bad_json() {
        let result = extract_history_reader("{not json".as_bytes(), &HistoryConfig::default());
        assert!(matches!(result, Err(HistoryError::Json(_))));
    }
}
