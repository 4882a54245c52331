use axum::Json;
use serde_json::{json, Value};

use crate::cloudflare::{CloudflareClient, CloudflareError, FirewallRule};
use crate::config;
use crate::error::ApiError;

/// GET /api/cloudflare/firewall - concurrent per-zone fetch; each rule gets
/// an explicit `zone_id` so the dashboard can tell collisions apart.
pub async fn firewall_get() -> Result<Json<Value>, ApiError> {
    let cfg = config::config();
    let token = cfg.cloudflare.require_token()?;
    let zone_ids = cfg.cloudflare.require_zones()?;
    let client = CloudflareClient::new(token);

    let fetches = zone_ids.iter().map(|zone_id| {
        let client = &client;
        async move {
            let rules: Vec<FirewallRule> = client
                .get(&format!("/zones/{zone_id}/firewall/rules"))
                .await
                .map_err(|e| CloudflareError::for_zone(zone_id, e))?;
            Ok::<_, CloudflareError>(tag_zone_rules(zone_id, rules))
        }
    });

    let merged: Vec<FirewallRule> = futures::future::try_join_all(fetches)
        .await?
        .into_iter()
        .flatten()
        .collect();

    Ok(Json(json!({ "success": true, "data": merged })))
}

fn tag_zone_rules(zone_id: &str, rules: Vec<FirewallRule>) -> Vec<FirewallRule> {
    rules
        .into_iter()
        .map(|mut rule| {
            rule.zone_id = Some(zone_id.to_string());
            rule
        })
        .collect()
}
