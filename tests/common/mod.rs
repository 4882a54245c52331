use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Drive the router in-process; no database or upstream API is needed for the
/// validation paths these tests exercise.
pub async fn get(path: &str) -> Result<(StatusCode, Value)> {
    let app = portal_api_rust::app();
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty())?)
        .await?;
    split(response).await
}

pub async fn post_json(path: &str, body: Value) -> Result<(StatusCode, Value)> {
    let app = portal_api_rust::app();
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    let response = app.oneshot(request).await?;
    split(response).await
}

async fn split(response: Response<Body>) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
