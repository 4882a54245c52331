use thiserror::Error;

/// Ingest failures. All of them are fail-closed: the pipeline keeps zero
/// records and surfaces a single user-visible notice.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Non-2xx transport status from the backend route.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// `success: false` envelope, even on HTTP 200.
    #[error("{0}")]
    Upstream(String),

    /// Response body not matching the expected `{success, data[]}` shape.
    #[error("Invalid data format from server")]
    Shape,
}
