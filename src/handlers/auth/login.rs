use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, AccountState, LoginDecision};
use crate::error::ApiError;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/login - check credentials, enforce the 3-strike lockout, and
/// issue the session cookie on success.
pub async fn login_post(Json(body): Json<LoginRequest>) -> Result<Response, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required."));
    }

    let user = store::users::find_by_email(&body.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials."))?;

    let account = AccountState {
        password_hash: user.password_hash.clone(),
        login_attempts: user.login_attempts.max(0) as u32,
        locked: user.status == "Locked",
        lock_until: user.lock_until,
    };

    match auth::evaluate_login(&account, &body.password, chrono::Utc::now()) {
        LoginDecision::Locked { until } => Err(ApiError::forbidden(format!(
            "Account is locked. Try again after {}.",
            until.to_rfc3339()
        ))),

        LoginDecision::RejectedAndLocked { attempts, until } => {
            store::users::record_failed_attempt(&body.email, attempts as i32, Some(until)).await?;
            tracing::warn!("Account {} locked after {} failed attempts", body.email, attempts);
            Err(ApiError::forbidden(format!(
                "Account locked after {attempts} failed attempts. Try again after {}.",
                until.to_rfc3339()
            )))
        }

        LoginDecision::Rejected { attempts } => {
            store::users::record_failed_attempt(&body.email, attempts as i32, None).await?;
            Err(ApiError::unauthorized("Invalid credentials."))
        }

        LoginDecision::Accepted => {
            store::users::reset_attempts(&body.email).await?;
            let user_id = user.id.to_string();
            let cookie = auth::session_cookie(&user_id);

            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(json!({
                    "success": true,
                    "message": "Login successful",
                    "userId": user_id,
                })),
            )
                .into_response())
        }
    }
}
