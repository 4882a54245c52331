use axum::Json;
use serde_json::{json, Value};

use super::parse_id_batch;
use crate::error::ApiError;
use crate::store;

/// POST /api/users/convert-email - rewrite the selected accounts' e-mail
/// addresses onto the default corporate domain.
pub async fn convert_email_post(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let ids = parse_id_batch(&body)
        .map_err(|_| ApiError::bad_request("No user IDs provided"))?;

    let modified = store::users::convert_emails(&ids).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{modified} emails updated successfully"),
    })))
}
