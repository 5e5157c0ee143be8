use serde_json::{Number, Value};

/// Cell markers treated as missing values.
const NA_MARKERS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "n/a", "null", "NULL", "None", "<NA>"];

/// The JSON type a column's cells are emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

pub fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell.trim())
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Pick the narrowest kind every non-missing cell fits. A column with no
/// values at all stays `Text`.
pub fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut integer = true;
    let mut float = true;
    let mut boolean = true;
    let mut seen = false;

    for cell in cells.filter(|c| !is_missing(c)) {
        seen = true;
        let cell = cell.trim();
        integer &= cell.parse::<i64>().is_ok();
        float &= cell.parse::<f64>().map(|f| f.is_finite()).unwrap_or(false);
        boolean &= parse_bool(cell).is_some();
        if !integer && !float && !boolean {
            return ColumnKind::Text;
        }
    }

    if !seen {
        ColumnKind::Text
    } else if integer {
        ColumnKind::Integer
    } else if float {
        ColumnKind::Float
    } else if boolean {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

/// Convert one raw cell to JSON according to its column kind.
pub fn to_value(cell: &str, kind: ColumnKind) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    match kind {
        ColumnKind::Integer => trimmed.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
        ColumnKind::Float => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ColumnKind::Boolean => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
        ColumnKind::Text => Value::String(cell.to_string()),
    }
}
