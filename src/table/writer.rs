use crate::error::Result;
use crate::table::builder::NormalizedTable;
use crate::table::focus::FocusView;
use serde_json::{Map, Value};
use std::io::Write;

/// Output encodings for exported views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Header row then one line per row; null is an empty field
    Csv,
    /// A JSON array of objects; null is `null`
    Json,
}

/// Anything that can be exported as named columns of plain values
pub trait Tabular {
    fn column_names(&self) -> Vec<&'static str>;

    /// One value per column for every row, in column order
    fn row_values(&self) -> Vec<Vec<Value>>;
}

impl Tabular for NormalizedTable {
    fn column_names(&self) -> Vec<&'static str> {
        self.display_columns().into_iter().map(|c| c.name()).collect()
    }

    fn row_values(&self) -> Vec<Vec<Value>> {
        let columns = self.display_columns();
        self.rows()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.get(*c).map(|cell| cell.to_json()).unwrap_or(Value::Null))
                    .collect()
            })
            .collect()
    }
}

impl Tabular for FocusView {
    fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name()).collect()
    }

    fn row_values(&self) -> Vec<Vec<Value>> {
        self.rows()
            .iter()
            .map(|row| self.columns().iter().map(|c| row.value(*c)).collect())
            .collect()
    }
}

/// Writes a tabular view as CSV or as a JSON array of records
pub struct TableWriter<W: Write> {
    writer: W,
    format: ExportFormat,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, format: ExportFormat) -> Self {
        TableWriter { writer, format }
    }

    pub fn write<T: Tabular>(&mut self, view: &T) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.write_csv(view),
            ExportFormat::Json => self.write_json(view),
        }
    }

    fn write_csv<T: Tabular>(&mut self, view: &T) -> Result<()> {
        let mut out = csv::Writer::from_writer(&mut self.writer);
        out.write_record(view.column_names())?;
        for values in view.row_values() {
            out.write_record(values.iter().map(csv_field))?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_json<T: Tabular>(&mut self, view: &T) -> Result<()> {
        let names = view.column_names();
        let records: Vec<Map<String, Value>> = view
            .row_values()
            .into_iter()
            .map(|values| {
                names
                    .iter()
                    .map(|name| name.to_string())
                    .zip(values)
                    .collect()
            })
            .collect();

        serde_json::to_writer(&mut self.writer, &records)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn csv_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::builder::build_table;
    use crate::table::focus::build_focus_view;
    use crate::types::RawRecord;
    use serde_json::json;

    fn table(values: Value) -> NormalizedTable {
        let records: Vec<RawRecord> = values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        build_table(&records)
    }

    fn render<T: Tabular>(view: &T, format: ExportFormat) -> String {
        let mut writer = TableWriter::new(Vec::new(), format);
        writer.write(view).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_focus_csv() {
        let view = build_focus_view(&table(json!([
            {"lender": "Acme, Inc", "loanType": "CONV", "recordingDate": "2020-01-02"},
            {"loanType": "VA", "recordingDate": "nope"}
        ])));

        let output = render(&view, ExportFormat::Csv);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "Year,PurchaseDate,LoanType,LenderName");
        assert_eq!(lines[1], "2020,2020-01-02,Conventional,\"Acme, Inc\"");
        assert_eq!(lines[2], ",,VA,");
    }

    #[test]
    fn test_focus_json() {
        let view = build_focus_view(&table(json!([
            {"loanType": "FHA", "recordingDate": "2020-01-02"}
        ])));

        let output = render(&view, ExportFormat::Json);
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            parsed,
            json!([{"Year": 2020, "PurchaseDate": "2020-01-02", "LoanType": "FHA"}])
        );
    }

    #[test]
    fn test_table_json_uses_display_order_and_nulls() {
        let table = table(json!([
            {"salePrice": 300000, "lender": "Acme"},
            {"saleTransDate": "July 1, 2019", "lender": "Bolt"}
        ]));

        let output = render(&table, ExportFormat::Json);
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            parsed,
            json!([
                {"saleDate": null, "lenderName": "Acme", "salePrice": 300000},
                {"saleDate": "2019-07-01", "lenderName": "Bolt", "salePrice": null}
            ])
        );
        assert_eq!(table.column_names(), vec!["saleDate", "lenderName", "salePrice"]);
    }

    #[test]
    fn test_empty_view_writes_header_only() {
        let view = build_focus_view(&NormalizedTable::default());
        let output = render(&view, ExportFormat::Csv);
        assert_eq!(output, "Year,PurchaseDate,LoanType,LenderName\n");
        assert_eq!(render(&view, ExportFormat::Json), "[]\n");
    }
}
