use rust_xlsxwriter::Workbook;

use super::progress::{CancelToken, ExportError, ExportOutcome, ExportProgress};
use super::{cell_text, Column};
use crate::pipeline::Record;

/// Spreadsheet workbook export: one sheet, explicit column widths, a header
/// row, then one row per record in the filtered set.
pub struct XlsxExport {
    sheet_name: String,
    columns: Vec<Column>,
}

impl XlsxExport {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self { sheet_name: sheet_name.into(), columns }
    }

    /// Build the workbook row by row, reporting progress and observing the
    /// cancel token between rows, then return the finished `.xlsx` bytes.
    pub async fn write<F>(
        &self,
        records: &[&Record],
        token: &CancelToken,
        mut on_progress: F,
    ) -> Result<ExportOutcome<Vec<u8>>, ExportError>
    where
        F: FnMut(ExportProgress),
    {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name.as_str())?;

        for (col, column) in self.columns.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, column.width)?;
            worksheet.write_string(0, col, column.header.as_str())?;
        }

        for (row, record) in records.iter().enumerate() {
            if token.is_canceled() {
                return Ok(ExportOutcome::Canceled);
            }

            for (col, column) in self.columns.iter().enumerate() {
                worksheet.write_string((row + 1) as u32, col as u16, cell_text(record, column).as_str())?;
            }

            on_progress(ExportProgress {
                rows_done: row + 1,
                rows_total: records.len(),
                bytes_done: 0,
                bytes_total: None,
            });

            tokio::task::yield_now().await;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(ExportOutcome::Completed(buffer))
    }
}
