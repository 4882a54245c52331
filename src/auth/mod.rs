use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::config;

/// Stored password form: SHA-256 hex digest.
pub fn hash_password(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    format!("{digest:x}")
}

pub fn verify_password(raw: &str, stored: &str) -> bool {
    hash_password(raw).eq_ignore_ascii_case(stored)
}

/// Account state relevant to the lockout policy.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub password_hash: String,
    pub login_attempts: u32,
    pub locked: bool,
    pub lock_until: Option<DateTime<Utc>>,
}

/// What the login route should do for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginDecision {
    /// Account is locked and the lock has not expired.
    Locked { until: DateTime<Utc> },
    /// Wrong password; persist the bumped attempt counter.
    Rejected { attempts: u32 },
    /// Wrong password and this failure crossed the limit; lock the account.
    RejectedAndLocked { attempts: u32, until: DateTime<Utc> },
    /// Credentials valid; reset the counter and clear any expired lock.
    Accepted,
}

/// Pure lockout policy: three consecutive failures lock the account for a
/// fixed long duration. An expired lock no longer blocks the attempt.
pub fn evaluate_login(
    account: &AccountState,
    password: &str,
    now: DateTime<Utc>,
) -> LoginDecision {
    let security = &config::config().security;

    if account.locked {
        if let Some(until) = account.lock_until {
            if until > now {
                return LoginDecision::Locked { until };
            }
        }
    }

    if verify_password(password, &account.password_hash) {
        return LoginDecision::Accepted;
    }

    let attempts = account.login_attempts + 1;
    if attempts >= security.max_login_attempts {
        let until = now + Duration::days(security.lock_duration_days);
        LoginDecision::RejectedAndLocked { attempts, until }
    } else {
        LoginDecision::Rejected { attempts }
    }
}

/// Build the `Set-Cookie` value for a fresh session: HTTP-only,
/// SameSite=Strict, 24 hours, Secure outside development.
pub fn session_cookie(user_id: &str) -> String {
    let cfg = config::config();
    let max_age = cfg.security.session_ttl_hours * 3600;
    let mut cookie = format!(
        "{}={user_id}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}",
        cfg.security.session_cookie_name,
    );
    if cfg.environment != config::Environment::Development {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(attempts: u32) -> AccountState {
        AccountState {
            password_hash: hash_password("correct-horse"),
            login_attempts: attempts,
            locked: false,
            lock_until: None,
        }
    }

    #[test]
    fn correct_password_is_accepted() {
        let decision = evaluate_login(&account(2), "correct-horse", Utc::now());
        assert_eq!(decision, LoginDecision::Accepted);
    }

    #[test]
    fn wrong_password_bumps_the_attempt_counter() {
        let decision = evaluate_login(&account(0), "nope", Utc::now());
        assert_eq!(decision, LoginDecision::Rejected { attempts: 1 });
    }

    #[test]
    fn third_failure_locks_the_account() {
        let now = Utc::now();
        match evaluate_login(&account(2), "nope", now) {
            LoginDecision::RejectedAndLocked { attempts, until } => {
                assert_eq!(attempts, 3);
                assert!(until > now + Duration::days(365));
            }
            other => panic!("expected lock, got {other:?}"),
        }
    }

    #[test]
    fn unexpired_lock_blocks_even_correct_credentials() {
        let now = Utc::now();
        let until = now + Duration::days(1);
        let mut acct = account(3);
        acct.locked = true;
        acct.lock_until = Some(until);
        assert_eq!(
            evaluate_login(&acct, "correct-horse", now),
            LoginDecision::Locked { until }
        );
    }

    #[test]
    fn expired_lock_no_longer_blocks() {
        let now = Utc::now();
        let mut acct = account(3);
        acct.locked = true;
        acct.lock_until = Some(now - Duration::hours(1));
        assert_eq!(evaluate_login(&acct, "correct-horse", now), LoginDecision::Accepted);
    }

    #[test]
    fn session_cookie_is_locked_down() {
        let cookie = session_cookie("user-1");
        assert!(cookie.starts_with("session=user-1"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
