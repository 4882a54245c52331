pub mod error;
pub mod state;
pub mod types;

pub use error::PipelineError;
pub use state::ListPipeline;
pub use types::*;
