use crate::error::{HistoryError, Result};
use crate::harvest::detector::is_record_like;
use crate::types::{HistoryConfig, RawRecord};
use serde_json::Value;
use tracing::{debug, warn};

/// Walks an arbitrary JSON document and collects every record-like object
pub struct RecordHarvester {
    config: HistoryConfig,
}

impl RecordHarvester {
    pub fn new(config: HistoryConfig) -> Self {
        RecordHarvester { config }
    }

    /// Harvest record-like objects from a JSON value.
    ///
    /// Objects are returned in pre-order (a record comes before any record
    /// nested inside it) and borrowed from `value` with all keys intact.
    pub fn harvest<'a>(&self, value: &'a Value) -> Result<Vec<&'a RawRecord>> {
        let mut records = Vec::new();
        self.visit(value, 0, &mut records)?;
        Ok(records)
    }

    fn visit<'a>(
        &self,
        value: &'a Value,
        depth: usize,
        records: &mut Vec<&'a RawRecord>,
    ) -> Result<()> {
        match value {
            Value::Object(obj) => {
                self.check_depth(depth)?;
                self.visit_object(obj, depth, records)?;
            }
            Value::Array(arr) => {
                self.check_depth(depth)?;
                for item in arr {
                    self.visit(item, depth + 1, records)?;
                }
            }
            _ => {
                // Scalars never hold records
            }
        }

        Ok(())
    }

    fn visit_object<'a>(
        &self,
        obj: &'a RawRecord,
        depth: usize,
        records: &mut Vec<&'a RawRecord>,
    ) -> Result<()> {
        if is_record_like(obj) {
            debug!(depth, keys = obj.len(), "harvested record");
            records.push(obj);
        }

        // Matched records are still searched; loan details often nest inside a sale
        for nested in obj.values() {
            self.visit(nested, depth + 1, records)?;
        }

        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            warn!(limit = self.config.max_depth, "document nesting exceeds depth limit");
            return Err(HistoryError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for RecordHarvester {
    fn default() -> Self {
        RecordHarvester::new(HistoryConfig::default())
    }
}

/// Harvest with the default depth limit
pub fn harvest(value: &Value) -> Result<Vec<&RawRecord>> {
    RecordHarvester::default().harvest(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Wrap `inner` in `levels` alternating object/array layers
    fn bury(inner: Value, levels: usize) -> Value {
        (0..levels).fold(inner, |acc, level| {
            if level % 2 == 0 {
                let mut obj = RawRecord::new();
                obj.insert(format!("level{}", level), acc);
                Value::Object(obj)
            } else {
                json!([acc])
            }
        })
    }

    #[test]
    fn test_scalars_yield_nothing() {
        let harvester = RecordHarvester::default();
        for value in [json!(null), json!(1), json!("lender"), json!(true)] {
            assert!(harvester.harvest(&value).unwrap().is_empty());
        }
    }

    #[test]
    fn test_root_record() {
        let input = json!({"lender": "Acme Bank", "loanAmount": 1000});
        let records = RecordHarvester::default().harvest(&input).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("lender").unwrap(), "Acme Bank");
    }

    #[test]
    fn test_depths_zero_three_seven() {
        let input = json!({
            "saleAmount": 1,
            "a": bury(json!({"lender": "three"}), 2),
            "b": [bury(json!({"deedType": "seven"}), 5)]
        });

        let records = RecordHarvester::default().harvest(&input).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].contains_key("saleAmount"));
        assert_eq!(records[1].get("lender").unwrap(), "three");
        assert_eq!(records[2].get("deedType").unwrap(), "seven");
    }

    #[test]
    fn test_nested_record_inside_record() {
        let input = json!({
            "sale": {
                "saleAmount": 300000,
                "mortgage": {"lender1": "Acme Bank", "amountLoan": 250000}
            }
        });

        let records = RecordHarvester::default().harvest(&input).unwrap();

        assert_eq!(records.len(), 2);
        // Parent keeps its nested object untouched
        assert!(records[0].contains_key("mortgage"));
        assert!(records[1].contains_key("lender1"));
    }

    #[test]
    fn test_array_order_preserved() {
        let input = json!([
            {"lender": "first"},
            {"other": [{"lender": "second"}]},
            {"lender": "third"}
        ]);

        let records = RecordHarvester::default().harvest(&input).unwrap();
        let lenders: Vec<_> = records
            .iter()
            .map(|r| r.get("lender").unwrap().as_str().unwrap())
            .collect();

        assert_eq!(lenders, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_depth_limit_is_an_error() {
        let input = bury(json!({"lender": "deep"}), 7);
        let harvester = RecordHarvester::new(HistoryConfig { max_depth: 4 });

        match harvester.harvest(&input) {
            Err(HistoryError::DepthLimitExceeded { limit }) => assert_eq!(limit, 4),
            other => panic!("expected depth error, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_limit_boundary() {
        // Record object sits at depth 7
        let input = bury(json!({"lender": "deep"}), 7);

        let at_limit = RecordHarvester::new(HistoryConfig { max_depth: 7 });
        assert_eq!(at_limit.harvest(&input).unwrap().len(), 1);

        let below = RecordHarvester::new(HistoryConfig { max_depth: 6 });
        assert!(below.harvest(&input).is_err());
    }
}
