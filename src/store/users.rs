use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::Row;
use uuid::Uuid;

use crate::error::ApiError;

/// Staff account row as the login route needs it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub login_attempts: i32,
    pub lock_until: Option<DateTime<Utc>>,
}

/// Normalized account row consumed by the quota-fix view: reference ids are
/// trimmed and lowercased so they join cleanly against activity rows.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedUser {
    pub referenceid: String,
    pub targetquota: String,
}

pub async fn find_by_email(email: &str) -> Result<Option<UserRow>, ApiError> {
    let pool = super::pool()?;
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash, status, login_attempts, lock_until
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn record_failed_attempt(
    email: &str,
    attempts: i32,
    lock_until: Option<DateTime<Utc>>,
) -> Result<(), ApiError> {
    let pool = super::pool()?;
    let status = if lock_until.is_some() { "Locked" } else { "Active" };
    sqlx::query(
        "UPDATE users SET login_attempts = $2, status = $3, lock_until = $4 WHERE email = $1",
    )
    .bind(email)
    .bind(attempts)
    .bind(status)
    .bind(lock_until)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn reset_attempts(email: &str) -> Result<(), ApiError> {
    let pool = super::pool()?;
    sqlx::query(
        "UPDATE users SET login_attempts = 0, status = 'Active', lock_until = NULL
         WHERE email = $1",
    )
    .bind(email)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_normalized() -> Result<Vec<NormalizedUser>, ApiError> {
    let pool = super::pool()?;
    let rows = sqlx::query(
        "SELECT COALESCE(reference_id, '') AS reference_id,
                COALESCE(target_quota, '') AS target_quota
         FROM users",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| NormalizedUser {
            referenceid: row
                .get::<String, _>("reference_id")
                .trim()
                .to_lowercase(),
            targetquota: row.get::<String, _>("target_quota"),
        })
        .collect())
}

pub async fn delete_many(ids: &[Uuid]) -> Result<u64, ApiError> {
    let pool = super::pool()?;
    let result = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(ids)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Field a bulk transfer may reassign. Whitelisted so the column name can be
/// interpolated into the statement safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Tsm,
    Manager,
}

impl TransferKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "TSM" => Some(TransferKind::Tsm),
            "Manager" => Some(TransferKind::Manager),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            TransferKind::Tsm => "tsm",
            TransferKind::Manager => "manager",
        }
    }
}

pub async fn transfer_many(
    ids: &[Uuid],
    kind: TransferKind,
    target_id: &str,
) -> Result<u64, ApiError> {
    let pool = super::pool()?;
    let sql = format!(
        "UPDATE users SET {} = $1, updated_at = NOW() WHERE id = ANY($2)",
        kind.column()
    );
    let result = sqlx::query(&sql)
        .bind(target_id)
        .bind(ids)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Rewrite each account's e-mail onto the default corporate domain and
/// recompute the company name from the domain it had before.
pub async fn convert_emails(ids: &[Uuid]) -> Result<u64, ApiError> {
    let pool = super::pool()?;
    let result = sqlx::query(
        "UPDATE users SET
             company = CASE
                 WHEN email ILIKE '%@disruptivesolutionsinc.com' THEN 'Disruptive Solutions Inc'
                 WHEN email ILIKE '%@ecoshiftcorp.com' THEN 'Ecoshift Corporation'
                 ELSE company
             END,
             email = split_part(email, '@', 1) || '@disruptivesolutionsinc.com'
         WHERE id = ANY($1)",
    )
    .bind(ids)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_kind_parses_only_the_known_values() {
        assert_eq!(TransferKind::parse("TSM"), Some(TransferKind::Tsm));
        assert_eq!(TransferKind::parse("Manager"), Some(TransferKind::Manager));
        assert_eq!(TransferKind::parse("manager"), None);
        assert_eq!(TransferKind::parse("Admin"), None);
    }
}
