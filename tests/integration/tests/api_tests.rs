//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn admin_token(server: &TestServer) -> String {
    sign_up(server, &RegisterRequest::admin()).await.unwrap().token
}

async fn volunteer(server: &TestServer) -> AuthResponse {
    sign_up(server, &RegisterRequest::unique("volunteer")).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_defaults_to_volunteer() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest {
        role: None,
        ..RegisterRequest::unique("volunteer")
    };

    let auth = sign_up(&server, &request).await.unwrap();

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.role, "volunteer");
    assert_eq!(auth.user.profile["points"], 0);
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.expires_in, 86_400);
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique("participant");
    sign_up(&server, &request).await.unwrap();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_unknown_role_and_bad_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/register", &RegisterRequest::unique("janitor"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ROLE").await.unwrap();

    let short_password = RegisterRequest {
        password: "short".to_string(),
        ..RegisterRequest::unique("volunteer")
    };
    let response = server.post("/api/auth/register", &short_password).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await.unwrap();
}

#[tokio::test]
async fn test_admin_sign_up_requires_access_code() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let without_code = RegisterRequest::unique("admin");
    let response = server.post("/api/auth/register", &without_code).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let auth = sign_up(&server, &RegisterRequest::admin()).await.unwrap();
    assert_eq!(auth.user.role, "admin");
}

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique("volunteer");
    sign_up(&server, &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, register_req.email);
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique("volunteer");
    sign_up(&server, &register_req).await.unwrap();

    let wrong_password = LoginRequest {
        email: register_req.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await.unwrap();

    let unknown = LoginRequest {
        email: format!("nobody-{}@example.com", unique_suffix()),
        password: "whatever123".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await.unwrap();
}

#[tokio::test]
async fn test_validate_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = volunteer(&server).await;

    let response = server
        .get_auth("/api/auth/validate-token", &auth.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["id"], auth.user.id);

    let response = server.get("/api/auth/validate-token").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL").await.unwrap();

    let response = server
        .get_auth("/api/auth/validate-token", "not.a.token")
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MALFORMED_CREDENTIAL").await.unwrap();
}

// ============================================================================
// Event Management Tests
// ============================================================================

#[tokio::test]
async fn test_admin_creates_event_with_defaults() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await;

    let event = create_event(&server, &token, &event_body("Beach Cleanup", "environment", 0, true))
        .await
        .unwrap();

    assert_eq!(event.name, "Beach Cleanup");
    assert_eq!(event.points_awarded, 25);
    assert_eq!(event.participant_count, 0);
    assert!(event.event_image.contains("environment"));
}

#[tokio::test]
async fn test_create_event_reports_missing_fields() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await;

    let response = server
        .post_auth("/api/events", &token, &json!({ "name": "Half an event" }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "MISSING_FIELDS");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("description"));
}

#[tokio::test]
async fn test_volunteer_cannot_manage_events() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;
    let event = create_event(&server, &admin, &event_body("Food Drive", "community", 0, true))
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/api/events/{}", event.id), &volunteer.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await.unwrap();

    let response = server
        .post_auth("/api/events", &volunteer.token, &event_body("Mine", "community", 0, true))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/api/events/{}/participants", event.id), &volunteer.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_update_and_delete_event() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await;
    let event = create_event(&server, &token, &event_body("Tree Planting", "environment", 10, true))
        .await
        .unwrap();
    let path = format!("/api/events/{}", event.id);

    let response = server
        .put_auth(&path, &token, &json!({ "participant_limit": "25", "location": null }))
        .await
        .unwrap();
    let updated: EventMutationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.event.participant_limit, 25);

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_unparseable_event_id_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/events/not-an-id").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_listing_hides_unpublished_events_from_volunteers() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;
    let category = format!("cat-{}", unique_suffix());
    create_event(&server, &admin, &event_body("Public", &category, 0, true))
        .await
        .unwrap();
    create_event(&server, &admin, &event_body("Draft", &category, 0, false))
        .await
        .unwrap();

    let path = format!("/api/events?category={category}");

    let response = server.get(&path).await.unwrap();
    let anonymous: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.count, 1);
    assert!(anonymous.events.iter().all(|e| e.publish_event));

    let response = server
        .get_auth(&format!("{path}&include_unpublished=true"), &volunteer.token)
        .await
        .unwrap();
    let as_volunteer: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(as_volunteer.count, 1);

    let response = server.get_auth(&path, &admin).await.unwrap();
    let as_admin: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(as_admin.count, 2);

    let response = server
        .get_auth(&format!("{path}&published=true"), &admin)
        .await
        .unwrap();
    let published: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(published.count, 1);

    let response = server
        .get_auth(&format!("{path}&published=TRUE"), &admin)
        .await
        .unwrap();
    let upper: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(upper.count, 1);

    let response = server
        .get_auth(&format!("{path}&published="), &admin)
        .await
        .unwrap();
    let blank: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(blank.count, 2);
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_registration_enforces_limit_and_duplicates() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let event = create_event(&server, &admin, &event_body("Beach Cleanup", "environment", 2, true))
        .await
        .unwrap();
    let register_path = format!("/api/events/{}/register", event.id);

    let first = volunteer(&server).await;
    let second = volunteer(&server).await;
    let third = volunteer(&server).await;

    let response = server.post_auth_empty(&register_path, &first.token).await.unwrap();
    let joined: RegistrationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(joined.event_id, event.id);
    assert!(joined.profile_synced);

    let response = server.post_auth_empty(&register_path, &first.token).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "DUPLICATE_REGISTRATION").await.unwrap();

    let response = server.post_auth_empty(&register_path, &second.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_auth_empty(&register_path, &third.token).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "EVENT_FULL").await.unwrap();

    // A full roster still reports duplicates as duplicates
    let response = server.post_auth_empty(&register_path, &second.token).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "DUPLICATE_REGISTRATION").await.unwrap();

    let response = server
        .get_auth(&format!("/api/events/{}/participants", event.id), &admin)
        .await
        .unwrap();
    let roster: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster["count"], 2);
    assert_eq!(roster["participants"][0]["user_id"], first.user.id);
}

#[tokio::test]
async fn test_concurrent_registrations_respect_limit() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let event = create_event(&server, &admin, &event_body("Soup Kitchen", "community", 3, true))
        .await
        .unwrap();
    let register_path = format!("/api/events/{}/register", event.id);

    let mut tokens = Vec::new();
    for _ in 0..8 {
        tokens.push(volunteer(&server).await.token);
    }

    let responses = register_all(&server, &register_path, &tokens).await;
    let accepted = responses.iter().filter(|s| **s == StatusCode::OK).count();
    let rejected = responses
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!(accepted, 3);
    assert_eq!(rejected, 5);

    let response = server.get(&format!("/api/events/{}", event.id)).await.unwrap();
    let stored: EventResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stored.participant_count, 3);
}

/// Fire one registration per token at the same time and collect the statuses
async fn register_all(server: &TestServer, path: &str, tokens: &[String]) -> Vec<StatusCode> {
    let mut handles = Vec::new();
    for token in tokens {
        let request = server
            .client
            .post(format!("{}{}", server.base_url(), path))
            .header("Authorization", format!("Bearer {token}"));
        handles.push(tokio::spawn(async move { request.send().await }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap().unwrap().status());
    }
    statuses
}

#[tokio::test]
async fn test_unpublished_event_rejects_registration() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;
    let event = create_event(&server, &admin, &event_body("Draft Drive", "community", 0, false))
        .await
        .unwrap();

    let response = server
        .post_auth_empty(&format!("/api/events/{}/register", event.id), &volunteer.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "EVENT_NOT_PUBLISHED").await.unwrap();

    let response = server
        .post_auth_empty(&format!("/api/events/{}/register", event.id), &admin)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "EVENT_NOT_PUBLISHED").await.unwrap();
}

#[tokio::test]
async fn test_cancel_and_profile_events() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;
    let event = create_event(&server, &admin, &event_body("River Walk", "environment", 1, true))
        .await
        .unwrap();
    let register_path = format!("/api/events/{}/register", event.id);
    let cancel_path = format!("/api/events/{}/cancel", event.id);

    let response = server.post_auth_empty(&register_path, &volunteer.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/users/events", &volunteer.token).await.unwrap();
    let mine: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.count, 1);
    assert_eq!(mine.events[0].id, event.id);

    let response = server.post_auth_empty(&cancel_path, &volunteer.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/users/events", &volunteer.token).await.unwrap();
    let mine: EventListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.count, 0);

    let response = server.post_auth_empty(&cancel_path, &volunteer.token).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "NOT_REGISTERED").await.unwrap();

    // The freed seat can be taken again
    let response = server.post_auth_empty(&register_path, &volunteer.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_keeps_event_list() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;
    let event = create_event(&server, &admin, &event_body("Park Day", "environment", 0, true))
        .await
        .unwrap();
    server
        .post_auth_empty(&format!("/api/events/{}/register", event.id), &volunteer.token)
        .await
        .unwrap();

    let response = server
        .put_auth(
            "/api/users/profile",
            &volunteer.token,
            &json!({ "profile": { "bio": "Weekend helper", "skills": ["first aid"] } }),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.profile["bio"], "Weekend helper");
    assert_eq!(updated.profile["events_participated"], json!([event.id]));

    let response = server
        .put_auth("/api/users/profile", &volunteer.token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/api/users/profile", &volunteer.token).await.unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.profile["bio"], "Weekend helper");
}

#[tokio::test]
async fn test_leaderboard_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let volunteer = volunteer(&server).await;

    let response = server.get("/api/users/leaderboard").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth("/api/users/leaderboard", &volunteer.token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["count"].as_u64().unwrap() <= 20);
}

#[tokio::test]
async fn test_admin_user_directory() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;

    let response = server.get_auth("/api/users?role=volunteer", &admin).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().all(|u| u["role"] == "volunteer"));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let response = server.get_auth("/api/users?role=janitor", &admin).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(&format!("/api/users/{}", volunteer.user.id), &admin)
        .await
        .unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.email, volunteer.user.email);

    let response = server.get_auth("/api/users", &volunteer.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_deleted_user_token_stops_working() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let volunteer = volunteer(&server).await;

    let response = server
        .delete_auth(&format!("/api/users/{}", volunteer.user.id), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/users/profile", &volunteer.token).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "UNKNOWN_SUBJECT").await.unwrap();

    let response = server
        .delete_auth(&format!("/api/users/{}", volunteer.user.id), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
