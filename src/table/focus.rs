//! Loan summary view: purchase date, loan type and lender per record

use crate::table::builder::NormalizedTable;
use crate::types::{CanonicalField, Cell};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Date columns in order of preference for the purchase date
const BEST_DATE_COLUMNS: [CanonicalField; 3] = [
    CanonicalField::SaleDate,
    CanonicalField::DocumentDate,
    CanonicalField::RecordingDate,
];

/// Display names for loan type codes; unknown codes pass through
static LOAN_TYPE_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("CONV", "Conventional"),
        ("FHA", "FHA"),
        ("VA", "VA"),
        ("HELOC", "HELOC"),
    ])
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusColumn {
    Year,
    PurchaseDate,
    LoanType,
    LenderName,
}

impl FocusColumn {
    pub const ALL: [FocusColumn; 4] = [
        FocusColumn::Year,
        FocusColumn::PurchaseDate,
        FocusColumn::LoanType,
        FocusColumn::LenderName,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FocusColumn::Year => "Year",
            FocusColumn::PurchaseDate => "PurchaseDate",
            FocusColumn::LoanType => "LoanType",
            FocusColumn::LenderName => "LenderName",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusRow {
    pub year: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub loan_type: Option<String>,
    pub lender_name: Option<String>,
}

impl FocusRow {
    pub fn value(&self, column: FocusColumn) -> Value {
        match column {
            FocusColumn::Year => self.year.map(Value::from).unwrap_or(Value::Null),
            FocusColumn::PurchaseDate => self
                .purchase_date
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Null),
            FocusColumn::LoanType => self.loan_type.clone().map(Value::String).unwrap_or(Value::Null),
            FocusColumn::LenderName => self
                .lender_name
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        }
    }
}

/// Filtered, date-sorted summary rows plus the columns that apply to them
#[derive(Debug, Clone, PartialEq)]
pub struct FocusView {
    columns: Vec<FocusColumn>,
    rows: Vec<FocusRow>,
}

impl FocusView {
    fn empty(columns: Vec<FocusColumn>) -> Self {
        FocusView {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[FocusColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[FocusRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years, newest first
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.rows.iter().filter_map(|r| r.year).collect();
        years.into_iter().rev().collect()
    }

    /// Distinct lender names, alphabetical
    pub fn lenders(&self) -> Vec<String> {
        let lenders: BTreeSet<&String> = self
            .rows
            .iter()
            .filter_map(|r| r.lender_name.as_ref())
            .collect();
        lenders.into_iter().cloned().collect()
    }

    /// Keep only rows accepted by `filter`; columns are unchanged
    pub fn filtered(&self, filter: &FocusFilter) -> FocusView {
        FocusView {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| filter.matches(row))
                .cloned()
                .collect(),
        }
    }
}

/// Exact-match filters on year and lender. An empty set filters nothing.
#[derive(Debug, Clone, Default)]
pub struct FocusFilter {
    pub years: BTreeSet<i32>,
    pub lenders: BTreeSet<String>,
}

impl FocusFilter {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() && self.lenders.is_empty()
    }

    pub fn matches(&self, row: &FocusRow) -> bool {
        let year_ok = self.years.is_empty()
            || row.year.map_or(false, |y| self.years.contains(&y));
        let lender_ok = self.lenders.is_empty()
            || row
                .lender_name
                .as_ref()
                .map_or(false, |l| self.lenders.contains(l));
        year_ok && lender_ok
    }
}

/// Derive the loan summary from a normalized table.
///
/// Rows need a loan type or a lender to be kept; with neither column in
/// the table the view is empty. Newest purchase date first, nulls last.
pub fn build_focus_view(table: &NormalizedTable) -> FocusView {
    let best_date = match BEST_DATE_COLUMNS.into_iter().find(|c| table.has_column(*c)) {
        Some(column) => column,
        None => return FocusView::empty(FocusColumn::ALL.to_vec()),
    };

    let has_loan_type = table.has_column(CanonicalField::LoanType);
    let has_lender = table.has_column(CanonicalField::LenderName);

    let mut columns = vec![FocusColumn::Year, FocusColumn::PurchaseDate];
    if has_loan_type {
        columns.push(FocusColumn::LoanType);
    }
    if has_lender {
        columns.push(FocusColumn::LenderName);
    }

    if !has_loan_type && !has_lender {
        return FocusView::empty(columns);
    }

    let mut rows: Vec<FocusRow> = table
        .rows()
        .iter()
        .map(|row| {
            let purchase_date = row.get(best_date).and_then(Cell::as_date);
            FocusRow {
                year: purchase_date.map(|d| d.year()),
                purchase_date,
                loan_type: row.get(CanonicalField::LoanType).map(loan_type_label),
                lender_name: row.get(CanonicalField::LenderName).map(Cell::to_string),
            }
        })
        .filter(|row| row.loan_type.is_some() || row.lender_name.is_some())
        .collect();

    rows.sort_by(|a, b| newest_first(a.purchase_date, b.purchase_date));

    FocusView { columns, rows }
}

fn loan_type_label(cell: &Cell) -> String {
    let code = cell.to_string();
    match LOAN_TYPE_LABELS.get(code.as_str()) {
        Some(label) => label.to_string(),
        None => code,
    }
}

fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
