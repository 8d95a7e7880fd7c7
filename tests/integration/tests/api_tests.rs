//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`. Migrations are applied on server start.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateMessage {
        message_type: Some("markdown".to_string()),
        alt_text: Some("alt".to_string()),
        custom_buttons: Some(json!({ "retry": true })),
        ..CreateMessage::unique()
    };

    let response = server.post("/api/messages", &request).await.unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.content, request.content);
    assert_eq!(created.sender, "匿名用户");
    assert_eq!(created.message_type, "markdown");
    assert_eq!(created.alt.as_deref(), Some("alt"));
    assert_eq!(created.custom_buttons, Some(json!({ "retry": true })));
    assert!(created.editable);
    assert!(created.show_buttons);
    assert!(!created.liked);

    let response = server
        .get(&format!("/api/messages/{}", created.id))
        .await
        .unwrap();
    let fetched: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/messages", &CreateMessage::unique()).await.unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let update = UpdateMessage {
        content: "edited".to_string(),
    };
    let response = server
        .put(&format!("/api/messages/{}", created.id), &update)
        .await
        .unwrap();
    let updated: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "edited");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_locked_message_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/messages", &CreateMessage::locked()).await.unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let update = UpdateMessage {
        content: "edited".to_string(),
    };
    let response = server
        .put(&format!("/api/messages/{}", created.id), &update)
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "MESSAGE_NOT_EDITABLE");
}

#[tokio::test]
async fn test_concurrent_likes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/messages", &CreateMessage::unique()).await.unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/messages/{}/like", created.id);

    let responses = futures::future::join_all((0..20).map(|_| server.post_empty(&path))).await;
    for response in responses {
        let like: LikeBody = assert_json(response.unwrap(), StatusCode::OK).await.unwrap();
        assert!(like.liked);
        assert_eq!(like.message_id, created.id);
    }

    let response = server
        .get(&format!("/api/messages/{}", created.id))
        .await
        .unwrap();
    let fetched: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.likes, 20);
}

#[tokio::test]
async fn test_delete_is_idempotent_and_hides_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/messages", &CreateMessage::unique()).await.unwrap();
    let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/messages/{}", created.id);

    for _ in 0..2 {
        let response = server.delete(&path).await.unwrap();
        let deleted: DeleteBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(deleted.status, "deleted");
        assert_eq!(deleted.message_id, created.id);
    }

    let response = server.get(&path).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_MESSAGE");

    let response = server.post_empty(&format!("{path}/like")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/messages/recent?limit=1000").await.unwrap();
    let recent: RecentMessagesBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(recent.messages.iter().all(|m| m.id != created.id));
}

#[tokio::test]
async fn test_paginated_listing_orders_by_timestamp() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // millisecond-scale values sort ahead of every second-scale timestamp,
    // and ahead of earlier runs of this test
    let base = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
        .floor()
        * 1000.0;
    let mut ids = Vec::new();
    for offset in [3.0, 1.0, 2.0] {
        let response = server
            .post("/api/messages", &CreateMessage::at(base + offset))
            .await
            .unwrap();
        let created: MessageBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(created.id);
    }

    let response = server
        .get("/api/messages?page=1&page_size=100&sort_order=desc")
        .await
        .unwrap();
    let page: MessagePageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 100);
    assert!(page.total >= 3);

    let ours: Vec<_> = page
        .messages
        .iter()
        .filter(|m| ids.contains(&m.id))
        .map(|m| m.timestamp)
        .collect();
    assert_eq!(ours, vec![base + 3.0, base + 2.0, base + 1.0]);
    for pair in page.messages.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_validation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/messages", &json!({ "content": "" }))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
    assert!(error.error.details.is_some());

    let response = server.get("/api/messages?page=0").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post("/api/messages/recent", &json!({ "limit": 5000 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_verify() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/users/register", &request).await.unwrap();
    let pending: RegistrationPendingBody = assert_json(response, StatusCode::ACCEPTED).await.unwrap();
    assert_eq!(pending.status, "pending");
    assert_eq!(pending.email, request.email);

    let token = server.mailer.token_for(&request.email).expect("verification mail");
    let verify = VerifyRequest { token };

    let response = server.post("/api/users/verify", &verify).await.unwrap();
    let user: UserBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.is_banned);

    // tokens are single use
    let response = server.post("/api/users/verify", &verify).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_REGISTRATION");
}

#[tokio::test]
async fn test_verify_duplicate_email_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = RegisterRequest::unique();
    let second = RegisterRequest {
        username: format!("{}x", first.username),
        ..first.clone()
    };

    // Both are pending at once; only the first verification can commit the email
    server.post("/api/users/register", &first).await.unwrap();
    let token_first = server.mailer.token_for(&first.email).expect("first mail");
    server.post("/api/users/register", &second).await.unwrap();
    let token_second = server.mailer.token_for(&second.email).expect("second mail");

    let response = server
        .post("/api/users/verify", &VerifyRequest { token: token_first })
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/users/verify", &VerifyRequest { token: token_second })
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}
