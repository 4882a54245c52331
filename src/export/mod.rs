pub mod csv;
pub mod progress;
pub mod xlsx;

pub use csv::CsvExport;
pub use progress::{CancelToken, ExportError, ExportOutcome, ExportProgress};
pub use xlsx::XlsxExport;

use serde_json::Value;

use crate::pipeline::Record;

/// One output column: fixed header text, the record field it reads, and the
/// spreadsheet column width.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub key: String,
    pub width: f64,
    pub timestamp: bool,
}

impl Column {
    pub fn new(header: impl Into<String>, key: impl Into<String>, width: f64) -> Self {
        Self { header: header.into(), key: key.into(), width, timestamp: false }
    }

    /// Column rendered as a human-readable date-time.
    pub fn timestamp(header: impl Into<String>, key: impl Into<String>, width: f64) -> Self {
        Self { header: header.into(), key: key.into(), width, timestamp: true }
    }
}

/// Placeholder written for absent fields.
pub const MISSING_FIELD: &str = "-";

/// Render one cell. Timestamps become a local human-readable string; missing
/// fields become the fixed placeholder.
pub fn cell_text(record: &Record, column: &Column) -> String {
    let value = match record.get(&column.key) {
        Some(Value::Null) | None => return MISSING_FIELD.to_string(),
        Some(v) => v,
    };

    if column.timestamp {
        return format_timestamp(value);
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        other => other.to_string(),
    }
}

fn format_timestamp(value: &Value) -> String {
    let parsed = match value {
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&chrono::Local))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.with_timezone(&chrono::Local)),
        _ => None,
    };
    match parsed {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => "N/A".to_string(),
    }
}

/// Download name with the current date embedded, e.g. `Zones_2024-03-05.csv`.
pub fn download_filename(stem: &str, extension: &str) -> String {
    format!("{stem}_{}.{extension}", chrono::Local::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        json!({
            "name": "example.com",
            "paused": false,
            "ttl": 300,
            "created_on": "2024-03-05T08:30:00Z",
            "note": null,
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn missing_and_null_fields_use_the_placeholder() {
        let rec = record();
        assert_eq!(cell_text(&rec, &Column::new("Note", "note", 10.0)), "-");
        assert_eq!(cell_text(&rec, &Column::new("Ghost", "ghost", 10.0)), "-");
    }

    #[test]
    fn booleans_and_numbers_render_as_display_text() {
        let rec = record();
        assert_eq!(cell_text(&rec, &Column::new("Paused", "paused", 10.0)), "No");
        assert_eq!(cell_text(&rec, &Column::new("TTL", "ttl", 10.0)), "300");
    }

    #[test]
    fn timestamps_render_human_readable_or_na() {
        let rec = record();
        let rendered = cell_text(&rec, &Column::timestamp("Created", "created_on", 25.0));
        assert!(rendered.contains("2024"), "unexpected render: {rendered}");
        assert_ne!(rendered, "2024-03-05T08:30:00Z");

        let bad = json!({ "created_on": "garbage" }).as_object().unwrap().clone();
        assert_eq!(cell_text(&bad, &Column::timestamp("Created", "created_on", 25.0)), "N/A");
    }

    #[test]
    fn filename_embeds_the_current_date() {
        let name = download_filename("Session_Logs", "xlsx");
        assert!(name.starts_with("Session_Logs_"));
        assert!(name.ends_with(".xlsx"));
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert!(name.contains(&date));
    }
}
