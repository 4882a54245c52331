use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store;

/// GET /api/sessions - login/logout audit trail, most recent first.
pub async fn list_get() -> Result<Json<Value>, ApiError> {
    let rows = store::sessions::fetch_all().await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}
