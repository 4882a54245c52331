use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cloudflare::{CloudflareClient, CloudflareError, DnsRecord};
use crate::config;
use crate::error::ApiError;

/// DNS row as the dashboard consumes it. Record ids are namespaced by zone:
/// the same record id can appear under several zones upstream.
#[derive(Debug, Clone, Serialize)]
pub struct DnsRow {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub status: String,
    #[serde(rename = "zoneName")]
    pub zone_name: Option<String>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<String>,
}

/// GET /api/cloudflare/dns - fan out to every configured zone concurrently,
/// tag, and merge. One bad zone fails the whole request.
pub async fn dns_get() -> Result<Json<Value>, ApiError> {
    let cfg = config::config();
    let token = cfg.cloudflare.require_token()?;
    let zone_ids = cfg.cloudflare.require_zones()?;
    let client = CloudflareClient::new(token);

    let merged = fetch_zone_rows(&client, zone_ids).await?;
    Ok(Json(json!({ "success": true, "data": merged })))
}

/// Fetch and tag DNS records across every zone. Fail-fast join: zone order is
/// preserved, siblings of a failure are discarded.
async fn fetch_zone_rows(
    client: &CloudflareClient,
    zone_ids: &[String],
) -> Result<Vec<DnsRow>, CloudflareError> {
    let fetches = zone_ids.iter().map(|zone_id| async move {
        let records: Vec<DnsRecord> = client
            .get(&format!("/zones/{zone_id}/dns_records"))
            .await
            .map_err(|e| CloudflareError::for_zone(zone_id, e))?;
        Ok::<_, CloudflareError>(tag_zone_records(zone_id, records))
    });

    Ok(futures::future::try_join_all(fetches)
        .await?
        .into_iter()
        .flatten()
        .collect())
}

fn tag_zone_records(zone_id: &str, records: Vec<DnsRecord>) -> Vec<DnsRow> {
    records
        .into_iter()
        .map(|record| DnsRow {
            id: format!("{zone_id}-{}", record.id),
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
            status: if record.proxied.unwrap_or(false) {
                "Proxied".to_string()
            } else {
                "DNS Only".to_string()
            },
            zone_name: record.zone_name,
            last_modified: record.modified_on,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(id: &str, proxied: bool) -> DnsRecord {
        DnsRecord {
            id: id.to_string(),
            record_type: "A".to_string(),
            name: format!("{id}.example.com"),
            content: "203.0.113.10".to_string(),
            ttl: 300,
            proxied: Some(proxied),
            zone_name: Some("example.com".to_string()),
            modified_on: Some("2024-03-05T08:30:00Z".to_string()),
        }
    }

    #[test]
    fn colliding_ids_become_unique_after_zone_tagging() {
        // ten record ids shared verbatim by both zones
        let ids: Vec<String> = (0..10).map(|i| format!("rec-{i}")).collect();
        let zone_a: Vec<DnsRecord> = ids.iter().map(|id| record(id, false)).collect();
        let zone_b: Vec<DnsRecord> = ids.iter().map(|id| record(id, true)).collect();

        let mut merged = tag_zone_records("zone-a", zone_a);
        merged.extend(tag_zone_records("zone-b", zone_b));

        assert_eq!(merged.len(), 20);
        let unique: HashSet<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(unique.len(), 20);
        assert!(unique.contains("zone-a-rec-0"));
        assert!(unique.contains("zone-b-rec-0"));
    }

    #[test]
    fn proxied_flag_maps_to_display_status() {
        let rows = tag_zone_records("z", vec![record("a", true), record("b", false)]);
        assert_eq!(rows[0].status, "Proxied");
        assert_eq!(rows[1].status, "DNS Only");
    }

    /// Local Cloudflare stand-in: every zone answers with one record except
    /// `zone-3`, which returns an API error envelope.
    async fn stub_upstream() -> std::net::SocketAddr {
        use axum::extract::Path;
        use axum::routing::get;
        use axum::Router;

        let app = Router::new().route(
            "/zones/:zone_id/dns_records",
            get(|Path(zone_id): Path<String>| async move {
                if zone_id == "zone-3" {
                    Json(json!({
                        "success": false,
                        "result": null,
                        "errors": [{"code": 9109, "message": "Unauthorized to access requested resource"}]
                    }))
                } else {
                    Json(json!({
                        "success": true,
                        "result": [{
                            "id": format!("rec-{zone_id}"),
                            "type": "A",
                            "name": format!("{zone_id}.example.com"),
                            "content": "203.0.113.10",
                            "ttl": 300,
                            "proxied": false
                        }],
                        "errors": []
                    }))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    fn zones(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|z| z.to_string()).collect()
    }

    #[tokio::test]
    async fn healthy_zones_merge_in_configured_order() {
        let addr = stub_upstream().await;
        let client = CloudflareClient::with_base_url("test-token", format!("http://{addr}"));

        let rows = fetch_zone_rows(&client, &zones(&["zone-1", "zone-2", "zone-4"]))
            .await
            .unwrap();

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["zone-1-rec-zone-1", "zone-2-rec-zone-2", "zone-4-rec-zone-4"]);
    }

    #[tokio::test]
    async fn one_failing_zone_discards_its_siblings_and_names_itself() {
        let addr = stub_upstream().await;
        let client = CloudflareClient::with_base_url("test-token", format!("http://{addr}"));

        // zones 1, 2 and 4 respond fine; zone 3 rejects the request
        let result = fetch_zone_rows(&client, &zones(&["zone-1", "zone-2", "zone-3", "zone-4"])).await;

        let err = result.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("zone-3"), "error should name the failing zone: {msg}");
        assert!(msg.contains("Unauthorized to access requested resource"), "missing upstream detail: {msg}");

        // the route surfaces this as a full 500, never a partial merge
        let api: ApiError = err.into();
        assert_eq!(api.status_code(), 500);
        assert!(api.message().contains("zone-3"));
    }
}
