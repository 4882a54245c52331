use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;

/// Activity log row for the taskflow list view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: String,
    pub referenceid: Option<String>,
    pub activitynumber: Option<String>,
    pub companyname: Option<String>,
    pub contactperson: Option<String>,
    pub typeclient: Option<String>,
    pub targetquota: Option<String>,
    pub activityremarks: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
}

pub async fn fetch_all(reference_id: Option<&str>) -> Result<Vec<ActivityRow>, ApiError> {
    let pool = super::pool()?;
    let rows = match reference_id {
        Some(reference_id) => {
            sqlx::query_as::<_, ActivityRow>(
                "SELECT id::text AS id, reference_id AS referenceid,
                        activity_number AS activitynumber, company_name AS companyname,
                        contact_person AS contactperson, type_client AS typeclient,
                        target_quota AS targetquota, activity_remarks AS activityremarks,
                        date_created
                 FROM activity WHERE reference_id = $1",
            )
            .bind(reference_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ActivityRow>(
                "SELECT id::text AS id, reference_id AS referenceid,
                        activity_number AS activitynumber, company_name AS companyname,
                        contact_person AS contactperson, type_client AS typeclient,
                        target_quota AS targetquota, activity_remarks AS activityremarks,
                        date_created
                 FROM activity",
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Apply one quota fix. The supplied identifier may be the primary id, the
/// reference id, or the human-readable activity number; the OR-match is kept
/// for compatibility with the store's original query. When key spaces collide
/// a single identifier can touch more than one row.
pub async fn update_quota(id: &str, target_quota: &str) -> Result<u64, ApiError> {
    let pool = super::pool()?;
    let result = sqlx::query(
        "UPDATE activity SET target_quota = $1
         WHERE id::text = $2 OR reference_id = $2 OR activity_number = $2",
    )
    .bind(target_quota)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
