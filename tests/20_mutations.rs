mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

// Batch validation happens before any write is attempted, so these paths are
// deterministic without a database.

#[tokio::test]
async fn delete_rejects_an_empty_batch() -> Result<()> {
    let (status, payload) = common::post_json("/api/users/delete", json!({ "ids": [] })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["success"], false);
    assert!(payload["error"].as_str().unwrap_or_default().contains("ids"));
    Ok(())
}

#[tokio::test]
async fn delete_rejects_a_non_array_batch() -> Result<()> {
    let (status, payload) =
        common::post_json("/api/users/delete", json!({ "ids": "abc" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["success"], false);
    Ok(())
}

#[tokio::test]
async fn transfer_rejects_a_missing_batch() -> Result<()> {
    let (status, payload) = common::post_json(
        "/api/users/transfer",
        json!({ "type": "TSM", "targetId": "t-1" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().unwrap_or_default().contains("No user IDs"));
    Ok(())
}

#[tokio::test]
async fn transfer_rejects_an_unknown_type() -> Result<()> {
    let (status, payload) = common::post_json(
        "/api/users/transfer",
        json!({ "ids": [Uuid::new_v4().to_string()], "type": "Admin", "targetId": "t-1" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().unwrap_or_default().contains("transfer type"));
    Ok(())
}

#[tokio::test]
async fn transfer_rejects_a_missing_target() -> Result<()> {
    let (status, payload) = common::post_json(
        "/api/users/transfer",
        json!({ "ids": [Uuid::new_v4().to_string()], "type": "Manager" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().unwrap_or_default().contains("target ID"));
    Ok(())
}

#[tokio::test]
async fn convert_email_rejects_an_empty_batch() -> Result<()> {
    let (status, payload) =
        common::post_json("/api/users/convert-email", json!({ "ids": [] })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["success"], false);
    Ok(())
}

#[tokio::test]
async fn quota_batch_rejects_an_empty_batch() -> Result<()> {
    let (status, payload) =
        common::post_json("/api/activity/quota-batch", json!({ "updates": [] })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().unwrap_or_default().contains("No updates"));
    Ok(())
}

#[tokio::test]
async fn login_requires_both_credential_fields() -> Result<()> {
    let (status, payload) =
        common::post_json("/auth/login", json!({ "email": "staff@example.com" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("Email and password are required"));
    Ok(())
}
