use axum::Json;
use serde_json::{json, Value};

use super::parse_id_batch;
use crate::error::ApiError;
use crate::store;
use crate::store::users::TransferKind;

/// POST /api/users/transfer - reassign the selected accounts to another
/// TSM or manager.
pub async fn transfer_post(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let ids = parse_id_batch(&body)
        .map_err(|_| ApiError::bad_request("No user IDs provided."))?;

    let kind = body
        .get("type")
        .and_then(Value::as_str)
        .and_then(TransferKind::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid transfer type."))?;

    let target_id = body
        .get("targetId")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("No target ID provided."))?;

    let modified = store::users::transfer_many(&ids, kind, target_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully transferred {modified} user(s) to {}.",
            body["type"].as_str().unwrap_or_default()),
        "modifiedCount": modified,
    })))
}
