use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store;

/// GET /api/users - normalized account rows for the quota-fix view.
pub async fn list_get() -> Result<Json<Value>, ApiError> {
    let users = store::users::fetch_normalized().await?;
    Ok(Json(json!({ "success": true, "data": users })))
}
