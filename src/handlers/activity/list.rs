use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Optional scoping carried over from the page URL.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// GET /api/activity - activity log rows for the taskflow view.
pub async fn list_get(Query(query): Query<ActivityQuery>) -> Result<Json<Value>, ApiError> {
    let rows = store::activity::fetch_all(query.user_id.as_deref()).await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}
