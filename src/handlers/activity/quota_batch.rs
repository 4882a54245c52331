use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store;

/// POST /api/activity/quota-batch - apply a batch of target-quota fixes.
///
/// Entries missing either field are skipped, not fatal: the route processes
/// what it can and reports the applied count as success. Each applied id may
/// match a row's primary id, reference id or activity number (OR-match kept
/// for compatibility; colliding key spaces can update more rows than
/// intended).
pub async fn quota_batch_post(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let updates = extract_updates(&body)?;

    let mut applied = 0u64;
    for (id, target_quota) in &updates {
        store::activity::update_quota(id, target_quota).await?;
        applied += 1;
    }

    Ok(Json(json!({
        "success": true,
        "message": format!("{applied} records updated successfully."),
        "count": applied,
    })))
}

/// Validate the batch shape up front, then keep only complete entries.
fn extract_updates(body: &Value) -> Result<Vec<(String, String)>, ApiError> {
    let updates = body
        .get("updates")
        .and_then(Value::as_array)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("No updates provided."))?;

    Ok(updates
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(Value::as_str)?;
            let quota = entry.get("targetquota").and_then(Value::as_str)?;
            if id.is_empty() || quota.is_empty() {
                return None;
            }
            Some((id.to_string(), quota.to_string()))
        })
        .collect())
}
