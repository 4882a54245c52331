use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;

/// One login/logout session log entry for the admin sessions page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SessionRow {
    pub id: String,
    pub status: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "ipAddress")]
    pub ip_address: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn fetch_all() -> Result<Vec<SessionRow>, ApiError> {
    let pool = super::pool()?;
    let rows = sqlx::query_as::<_, SessionRow>(
        "SELECT id::text AS id, status, email, department, timestamp,
                ip_address, user_agent, device_id, latitude, longitude
         FROM session_logs
         ORDER BY timestamp DESC NULLS LAST",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
