use axum::Json;
use serde_json::{json, Value};

use crate::cloudflare::{CloudflareClient, CloudflareError, ZoneAnalytics};
use crate::config;
use crate::error::ApiError;

/// GET /api/cloudflare/analytics - latest daily HTTP request totals per zone
/// via the GraphQL API. Every configured zone yields an entry, with
/// `data: null` when it has no traffic groups; absence of data is a valid
/// state, not an error.
pub async fn analytics_get() -> Result<Json<Value>, ApiError> {
    let cfg = config::config();
    let token = cfg.cloudflare.require_token()?;
    let zone_ids = cfg.cloudflare.require_zones()?;
    let client = CloudflareClient::new(token);

    let fetches = zone_ids.iter().map(|zone_id| {
        let client = &client;
        async move {
            let body = client
                .graphql(&analytics_query(zone_id))
                .await
                .map_err(|e| CloudflareError::for_zone(zone_id, e))?;
            parse_zone_analytics(zone_id, &body)
        }
    });

    let entries: Vec<ZoneAnalytics> = futures::future::try_join_all(fetches).await?;
    Ok(Json(json!({ "success": true, "data": entries })))
}

fn analytics_query(zone_id: &str) -> String {
    format!(
        r#"query {{
  viewer {{
    zones(filter: {{ zoneTag: "{zone_id}" }}) {{
      zoneTag
      httpRequests1dGroups(limit: 1, orderBy: [datetime_DESC]) {{
        dimensions {{ datetime }}
        sum {{ requests threats bandwidth cachedRequests }}
      }}
    }}
  }}
}}"#
    )
}

/// Interpret one zone's GraphQL response. Permission failures get their own
/// wording so an operator can tell a token scope problem from a query bug.
fn parse_zone_analytics(zone_id: &str, body: &Value) -> Result<ZoneAnalytics, CloudflareError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let permission = errors.iter().find_map(|e| {
                e.get("message").and_then(Value::as_str).filter(|m| {
                    let m = m.to_lowercase();
                    m.contains("permission") || m.contains("unauthorized")
                })
            });
            let message = match permission {
                Some(msg) => format!("Zone {zone_id} Permission error: {msg}"),
                None => format!(
                    "Zone {zone_id} GraphQL error: {}",
                    serde_json::to_string(errors).unwrap_or_default()
                ),
            };
            return Err(CloudflareError::Api(message));
        }
    }

    let zone = body
        .pointer("/data/viewer/zones/0")
        .filter(|z| !z.is_null());

    let zone_tag = zone
        .and_then(|z| z.get("zoneTag"))
        .and_then(Value::as_str)
        .unwrap_or(zone_id)
        .to_string();

    let data = zone
        .and_then(|z| z.pointer("/httpRequests1dGroups/0"))
        .filter(|g| !g.is_null())
        .cloned();

    Ok(ZoneAnalytics { zone_id: zone_tag, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_with_traffic_yields_its_latest_group() {
        let body = json!({
            "data": { "viewer": { "zones": [{
                "zoneTag": "zone-1",
                "httpRequests1dGroups": [{
                    "dimensions": { "datetime": "2024-03-05T00:00:00Z" },
                    "sum": { "requests": 120, "threats": 2, "bandwidth": 90000, "cachedRequests": 80 }
                }]
            }]}}
        });
        let entry = parse_zone_analytics("zone-1", &body).unwrap();
        assert_eq!(entry.zone_id, "zone-1");
        let data = entry.data.unwrap();
        assert_eq!(data.pointer("/sum/requests").unwrap(), 120);
    }

    #[test]
    fn zone_without_data_is_represented_with_null() {
        let body = json!({
            "data": { "viewer": { "zones": [{
                "zoneTag": "zone-2",
                "httpRequests1dGroups": []
            }]}}
        });
        let entry = parse_zone_analytics("zone-2", &body).unwrap();
        assert_eq!(entry.zone_id, "zone-2");
        assert!(entry.data.is_none());
    }

    #[test]
    fn missing_zone_entry_still_reports_the_configured_id() {
        let body = json!({ "data": { "viewer": { "zones": [] } } });
        let entry = parse_zone_analytics("zone-3", &body).unwrap();
        assert_eq!(entry.zone_id, "zone-3");
        assert!(entry.data.is_none());
    }

    #[test]
    fn permission_errors_get_their_own_wording() {
        let body = json!({
            "errors": [{ "message": "query does not have permission to view this zone" }]
        });
        let err = parse_zone_analytics("zone-4", &body).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("zone-4"));
        assert!(msg.contains("Permission error"));
    }

    #[test]
    fn other_graphql_errors_abort_with_the_payload() {
        let body = json!({ "errors": [{ "message": "unknown field" }] });
        let err = parse_zone_analytics("zone-5", &body).unwrap_err();
        assert!(err.to_string().contains("GraphQL error"));
    }
}
