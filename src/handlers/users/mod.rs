pub mod convert_email;
pub mod delete;
pub mod list;
pub mod transfer;

pub use convert_email::convert_email_post;
pub use delete::delete_post;
pub use list::list_get;
pub use transfer::transfer_post;

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Pull a non-empty `ids` array out of a mutation body. An absent, empty or
/// non-array batch is a 400 before any write is attempted; entries that are
/// not valid identifiers are skipped rather than failing the batch.
pub(crate) fn parse_id_batch(body: &Value) -> Result<Vec<Uuid>, ApiError> {
    let ids = body
        .get("ids")
        .and_then(Value::as_array)
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ApiError::bad_request("Invalid or missing 'ids' array."))?;

    Ok(ids
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|id| Uuid::parse_str(id).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_empty_or_non_array_batches_are_rejected() {
        for body in [json!({}), json!({ "ids": [] }), json!({ "ids": "abc" })] {
            let err = parse_id_batch(&body).unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn invalid_entries_are_skipped_not_fatal() {
        let valid = Uuid::new_v4();
        let body = json!({ "ids": [valid.to_string(), "not-a-uuid", 42] });
        let ids = parse_id_batch(&body).unwrap();
        assert_eq!(ids, vec![valid]);
    }
}
