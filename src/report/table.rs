use std::collections::HashMap;
use serde_json::{Map, Value};
use crate::errors::SonarchatError;
use super::infer::{infer_kind, to_value};
use tracing::debug;

pub type Record = Map<String, Value>;

/// In-memory view of one report: headers in file order and one JSON
/// record per row.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl ReportTable {
    /// Parse CSV bytes. The first row is the header; every record must
    /// have the same number of fields.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, SonarchatError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let columns = dedupe_headers(reader.headers()?.iter().map(|h| h.trim().to_string()).collect());
        if columns.iter().all(|c| c.is_empty()) {
            return Err(SonarchatError::InvalidReport("CSV report has no header row".into()));
        }

        let raw: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;

        let kinds: Vec<_> = (0..columns.len())
            .map(|i| infer_kind(raw.iter().map(|r| r.get(i).unwrap_or(""))))
            .collect();

        let rows = raw
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .zip(&kinds)
                    .enumerate()
                    .map(|(i, (name, kind))| (name.clone(), to_value(record.get(i).unwrap_or(""), *kind)))
                    .collect::<Record>()
            })
            .collect::<Vec<_>>();

        debug!(columns = columns.len(), rows = rows.len(), "Parsed CSV report");
        Ok(Self { columns, rows })
    }

    /// Build a table from records a client sent back. Column order follows
    /// first appearance.
    pub fn from_records(records: &[Value]) -> Result<Self, SonarchatError> {
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            let obj = record.as_object().ok_or_else(|| {
                SonarchatError::InvalidRequest(format!("csvData[{}] is not an object", i))
            })?;
            for key in obj.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            rows.push(obj.clone());
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Records in file order, as served to the frontend.
    pub fn records(&self) -> Vec<Value> {
        self.rows.iter().cloned().map(Value::Object).collect()
    }

    /// Resolve a column name case-insensitively to the header as written.
    pub fn column(&self, name: &str) -> Result<&str, SonarchatError> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(|c| c.as_str())
            .ok_or_else(|| SonarchatError::MissingColumn(name.to_string()))
    }

    /// Rows whose `column` equals `value`, ignoring case.
    pub fn filter_where(&self, column: &str, value: &str) -> Result<Vec<&Record>, SonarchatError> {
        let column = self.column(column)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| row.get(column).and_then(cell_text).is_some_and(|v| v.eq_ignore_ascii_case(value)))
            .collect())
    }

    pub fn count_where(&self, column: &str, value: &str) -> Result<usize, SonarchatError> {
        self.filter_where(column, value).map(|rows| rows.len())
    }

    /// Distinct non-null values of `column` with their counts, most frequent
    /// first and ties broken alphabetically.
    pub fn value_counts(&self, column: &str) -> Result<Vec<(String, usize)>, SonarchatError> {
        let column = self.column(column)?;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in self.rows.iter().filter_map(|row| row.get(column).and_then(cell_text)) {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }
}

/// Rename repeated headers to `name.1`, `name.2`, ... so no column is lost
/// when rows become maps.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        if !out.contains(&header) {
            seen.insert(header.clone(), 0);
            out.push(header);
            continue;
        }
        let n = seen.entry(header.clone()).or_insert(0);
        let renamed = loop {
            *n += 1;
            let candidate = format!("{}.{}", header, n);
            if !out.contains(&candidate) {
                break candidate;
            }
        };
        out.push(renamed);
    }
    out
}

/// Text form of a cell for matching; nulls have none.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = "\
key,rule,severity,type,line,message
AX1,java:S1192,MAJOR,CODE_SMELL,12,Define a constant
AX2,java:S2259,CRITICAL,BUG,,Null pointer
AX3,java:S1192,major,CODE_SMELL,40,Define a constant
AX4,java:S5131,BLOCKER,VULNERABILITY,8,Escape output
";

    fn table() -> ReportTable {
        ReportTable::from_csv(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_records_keep_file_order_and_types() {
        let records = table().records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["key"], "AX1");
        assert_eq!(records[0]["line"], json!(12));
        assert_eq!(records[1]["line"], Value::Null);
        assert_eq!(records[3]["key"], "AX4");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(SAMPLE.as_bytes());
        let table = ReportTable::from_csv(&bytes).unwrap();
        assert_eq!(table.columns()[0], "key");
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = ReportTable::from_csv(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, SonarchatError::Csv(_)));
    }

    #[test]
    fn test_header_only_report_is_empty() {
        let table = ReportTable::from_csv(b"severity,type\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_empty_report_is_invalid_report() {
        let err = ReportTable::from_csv(b"").unwrap_err();
        assert!(matches!(err, SonarchatError::InvalidReport(_)));
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let table = ReportTable::from_csv(b"tags,key,tags,tags\nx,K1,y,z\n").unwrap();
        assert_eq!(table.columns(), ["tags", "key", "tags.1", "tags.2"]);
        let records = table.records();
        assert_eq!(records[0]["tags"], "x");
        assert_eq!(records[0]["tags.1"], "y");
        assert_eq!(records[0]["tags.2"], "z");
    }

    #[test]
    fn test_column_lookup_ignores_case() {
        let table = table();
        assert_eq!(table.column("Severity").unwrap(), "severity");
        assert!(matches!(table.column("effort"), Err(SonarchatError::MissingColumn(_))));
    }

    #[test]
    fn test_count_where_ignores_case() {
        assert_eq!(table().count_where("severity", "MAJOR").unwrap(), 2);
        assert_eq!(table().count_where("type", "bug").unwrap(), 1);
    }

    #[test]
    fn test_value_counts_sorted() {
        let counts = table().value_counts("rule").unwrap();
        assert_eq!(counts[0], ("java:S1192".to_string(), 2));
        assert_eq!(counts[1], ("java:S2259".to_string(), 1));
        assert_eq!(counts[2], ("java:S5131".to_string(), 1));
    }

    #[test]
    fn test_from_records() {
        let table = ReportTable::from_records(&[
            json!({"Severity": "MINOR", "Type": "BUG"}),
            json!({"Severity": "MAJOR", "Rule": "py:S100"}),
        ]).unwrap();
        assert_eq!(table.columns(), ["Severity", "Type", "Rule"]);
        assert_eq!(table.count_where("severity", "minor").unwrap(), 1);
    }

    #[test]
    fn test_from_records_rejects_non_objects() {
        let err = ReportTable::from_records(&[json!("nope")]).unwrap_err();
        assert!(matches!(err, SonarchatError::InvalidRequest(_)));
    }
}
