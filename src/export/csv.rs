use super::progress::{CancelToken, ExportError, ExportOutcome, ExportProgress};
use super::{cell_text, Column};
use crate::pipeline::Record;

/// Chunked CSV encoder over a filtered record set.
///
/// Every line is built up front so the byte total is known, then appended one
/// row per chunk with a progress callback and a cancellation check between
/// chunks. Fields are always quoted; embedded quotes are doubled.
pub struct CsvExport {
    lines: Vec<String>,
    rows_total: usize,
    bytes_total: usize,
}

impl CsvExport {
    pub fn new(columns: &[Column], records: &[&Record]) -> Self {
        let mut lines = Vec::with_capacity(records.len() + 1);

        let header: Vec<String> =
            columns.iter().map(|c| quote(&c.header)).collect();
        lines.push(header.join(","));

        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|c| quote(&cell_text(record, c)))
                .collect();
            lines.push(row.join(","));
        }

        // newline separators count toward the total
        let bytes_total =
            lines.iter().map(String::len).sum::<usize>() + lines.len().saturating_sub(1);

        Self { lines, rows_total: records.len(), bytes_total }
    }

    pub fn bytes_total(&self) -> usize {
        self.bytes_total
    }

    /// Run the chunked write loop. Yields between chunks so the interface
    /// stays responsive and the token can be observed.
    pub async fn write<F>(
        &self,
        token: &CancelToken,
        mut on_progress: F,
    ) -> Result<ExportOutcome<String>, ExportError>
    where
        F: FnMut(ExportProgress),
    {
        let mut out = String::with_capacity(self.bytes_total);

        for (i, line) in self.lines.iter().enumerate() {
            if token.is_canceled() {
                return Ok(ExportOutcome::Canceled);
            }

            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);

            on_progress(ExportProgress {
                rows_done: i, // header line is not a row
                rows_total: self.rows_total,
                bytes_done: out.len(),
                bytes_total: Some(self.bytes_total),
            });

            tokio::task::yield_now().await;
        }

        Ok(ExportOutcome::Completed(out))
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
