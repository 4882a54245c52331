use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub cloudflare: CloudflareConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub views: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareConfig {
    /// API token shared by every zone; routes fail with a 500 when absent.
    pub api_token: Option<String>,
    /// Fixed, ordered set of tenant zone identifiers.
    pub zone_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub session_cookie_name: String,
    pub session_ttl_hours: u64,
    pub max_login_attempts: u32,
    pub lock_duration_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub default_page_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let zone_ids = env::var("CLOUDFLARE_ZONE_IDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|z| !z.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            environment,
            cloudflare: CloudflareConfig {
                api_token: env::var("CLOUDFLARE_API_TOKEN").ok().filter(|t| !t.is_empty()),
                zone_ids,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            security: SecurityConfig {
                session_cookie_name: "session".to_string(),
                session_ttl_hours: 24,
                max_login_attempts: 3,
                // The original portal locks offenders out effectively forever
                lock_duration_days: 50 * 365,
            },
            views: ViewConfig {
                default_page_size: env::var("VIEW_PAGE_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(20),
            },
        }
    }
}

impl CloudflareConfig {
    /// Token required by every Cloudflare route.
    pub fn require_token(&self) -> Result<&str, ApiError> {
        self.api_token
            .as_deref()
            .ok_or_else(|| ApiError::internal_server_error("Missing CLOUDFLARE_API_TOKEN"))
    }

    /// Zone list required by the multi-zone aggregation routes.
    pub fn require_zones(&self) -> Result<&[String], ApiError> {
        if self.zone_ids.is_empty() {
            return Err(ApiError::internal_server_error(
                "No Cloudflare Zone IDs configured",
            ));
        }
        Ok(&self.zone_ids)
    }
}

impl DatabaseConfig {
    pub fn require_url(&self) -> Result<&str, ApiError> {
        self.url
            .as_deref()
            .ok_or_else(|| ApiError::internal_server_error("DATABASE_URL is not set"))
    }
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Single accessor for the process-wide configuration.
pub fn config() -> &'static AppConfig {
    &CONFIG
}
