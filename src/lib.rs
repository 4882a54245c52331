pub mod auth;
pub mod cloudflare;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod store;

use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Dashboard data + administration
        .merge(cloudflare_routes())
        .merge(user_routes())
        .merge(activity_routes())
        .merge(session_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use handlers::auth;

    Router::new().route("/auth/login", post(auth::login_post))
}

fn cloudflare_routes() -> Router {
    use handlers::cloudflare;

    Router::new()
        .route("/api/cloudflare/zones", get(cloudflare::zones_get))
        .route("/api/cloudflare/dns", get(cloudflare::dns_get))
        .route("/api/cloudflare/firewall", get(cloudflare::firewall_get))
        .route("/api/cloudflare/analytics", get(cloudflare::analytics_get))
}

fn user_routes() -> Router {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list_get))
        .route("/api/users/delete", post(users::delete_post))
        .route("/api/users/transfer", post(users::transfer_post))
        .route("/api/users/convert-email", post(users::convert_email_post))
}

fn activity_routes() -> Router {
    use handlers::activity;

    Router::new()
        .route("/api/activity", get(activity::list_get))
        .route("/api/activity/quota-batch", post(activity::quota_batch_post))
}

fn session_routes() -> Router {
    use handlers::sessions;

    Router::new().route("/api/sessions", get(sessions::list_get))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Portal API (Rust)",
            "version": version,
            "description": "Internal staff portal backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/login (public - session cookie)",
                "cloudflare": "/api/cloudflare/{zones,dns,firewall,analytics}",
                "users": "/api/users[/delete|/transfer|/convert-email]",
                "activity": "/api/activity[/quota-batch]",
                "sessions": "/api/sessions",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store::health_check().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
