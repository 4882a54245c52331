pub mod list;
pub mod quota_batch;

pub use list::list_get;
pub use quota_batch::quota_batch_post;
