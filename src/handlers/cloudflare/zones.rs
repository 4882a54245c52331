use axum::Json;
use serde_json::{json, Value};

use crate::cloudflare::{CloudflareClient, Zone};
use crate::config;
use crate::error::ApiError;

/// GET /api/cloudflare/zones - single-tenant resource; the upstream zone list
/// is forwarded as-is inside the portal envelope.
pub async fn zones_get() -> Result<Json<Value>, ApiError> {
    let token = config::config().cloudflare.require_token()?;
    let client = CloudflareClient::new(token);

    let zones: Vec<Zone> = client.get("/zones").await?;
    Ok(Json(json!({ "success": true, "data": zones })))
}
