use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Progress snapshot handed to the caller between chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    pub rows_done: usize,
    pub rows_total: usize,
    pub bytes_done: usize,
    /// Known up front for CSV; unknown for workbook output until it is saved.
    pub bytes_total: Option<usize>,
}

/// Shared cancellation flag. Cloning hands the UI a handle it can trip while
/// the export loop is running; the loop observes it between chunks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A canceled export is a distinct outcome, not an error.
#[derive(Debug)]
pub enum ExportOutcome<T> {
    Completed(T),
    Canceled,
}

impl<T> ExportOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            ExportOutcome::Completed(value) => Some(value),
            ExportOutcome::Canceled => None,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, ExportOutcome::Canceled)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
