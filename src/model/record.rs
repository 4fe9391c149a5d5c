//! A single NDJSON log record.

use chrono::DateTime;
use serde_json::Value;

/// Field carrying the record's epoch-millisecond timestamp.
pub const TIME_FIELD: &str = "_time";

/// One parsed NDJSON line.
///
/// Any JSON value is accepted; the pipeline never validates a schema. The
/// `_time` field is only read for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Value);

impl Record {
    /// Wrap an already-parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consume the record, returning the JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `_time` field as epoch milliseconds, if present and numeric.
    ///
    /// Fractional milliseconds are truncated.
    pub fn time_millis(&self) -> Option<i64> {
        let time = self.0.get(TIME_FIELD)?;
        time.as_i64().or_else(|| time.as_f64().map(|ms| ms as i64))
    }

    /// `_time` formatted as `YYYY-MM-DD HH:MM:SS.mmm` in UTC.
    pub fn formatted_time(&self) -> Option<String> {
        let millis = self.time_millis()?;
        let timestamp = DateTime::from_timestamp_millis(millis)?;
        Some(timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
    }

    /// Single-line JSON rendering.
    pub fn compact(&self) -> String {
        self.0.to_string()
    }

    /// Indented multi-line JSON rendering.
    pub fn pretty(&self) -> String {
        format!("{:#}", self.0)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_millis_reads_integer_field() {
        let record = Record::new(json!({"_time": 1_700_000_000_123_i64, "msg": "x"}));
        assert_eq!(record.time_millis(), Some(1_700_000_000_123));
    }

    #[test]
    fn time_millis_truncates_float_field() {
        let record = Record::new(json!({"_time": 1500.9}));
        assert_eq!(record.time_millis(), Some(1500));
    }

    #[test]
    fn time_millis_none_for_missing_or_non_numeric() {
        assert_eq!(Record::new(json!({"a": 1})).time_millis(), None);
        assert_eq!(Record::new(json!({"_time": "soon"})).time_millis(), None);
        assert_eq!(Record::new(json!([1, 2])).time_millis(), None);
    }

    #[test]
    fn formatted_time_is_utc_with_millis() {
        let record = Record::new(json!({"_time": 0}));
        assert_eq!(
            record.formatted_time().as_deref(),
            Some("1970-01-01 00:00:00.000")
        );

        let record = Record::new(json!({"_time": 1_609_459_200_042_i64}));
        assert_eq!(
            record.formatted_time().as_deref(),
            Some("2021-01-01 00:00:00.042")
        );
    }

    #[test]
    fn compact_is_single_line() {
        let record = Record::new(json!({"a": {"b": [1, 2]}}));
        assert_eq!(record.compact(), r#"{"a":{"b":[1,2]}}"#);
    }

    #[test]
    fn pretty_is_multi_line() {
        let record = Record::new(json!({"a": 1, "b": 2}));
        let pretty = record.pretty();
        assert_eq!(pretty.lines().count(), 4, "got: {pretty}");
        assert!(pretty.starts_with('{'));
    }
}
