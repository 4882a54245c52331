use axum::Json;
use serde_json::{json, Value};

use super::parse_id_batch;
use crate::error::ApiError;
use crate::store;

/// POST /api/users/delete - bulk delete by id.
pub async fn delete_post(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let ids = parse_id_batch(&body)?;

    let deleted = store::users::delete_many(&ids).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("No users found to delete."));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Users deleted successfully.",
        "deletedCount": deleted,
    })))
}
