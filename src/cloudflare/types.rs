use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cloudflare v4 REST envelope
#[derive(Debug, Deserialize)]
pub struct CloudflareEnvelope<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareApiError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareApiError {
    pub code: i64,
    pub message: String,
}

/// Zone as returned by `GET /zones`; forwarded to the dashboard untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// DNS record as returned by `GET /zones/:id/dns_records`.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: Option<bool>,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// Firewall rule as returned by `GET /zones/:id/firewall/rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub action: String,
    #[serde(default)]
    pub filter: Option<FirewallFilter>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
    /// Attached during aggregation; not present on the upstream payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallFilter {
    pub id: String,
    pub expression: String,
}

/// One aggregated analytics entry. A zone with no traffic data is still
/// represented, with `data: null`.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneAnalytics {
    #[serde(rename = "zoneId")]
    pub zone_id: String,
    pub data: Option<Value>,
}
