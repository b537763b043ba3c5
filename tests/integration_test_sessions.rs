mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};

fn tomorrow() -> String {
    (Utc::now() + Duration::days(1)).to_rfc3339()
}

#[tokio::test]
async fn test_create_session_requires_positive_capacity() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;

    let res = app.post("/api/sessions", Some(&trainer_token), serde_json::json!({
        "name": "Bad", "schedule": tomorrow(), "capacity": 0
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post("/api/sessions", Some(&trainer_token), serde_json::json!({
        "name": "Bad", "schedule": "not-a-timestamp", "capacity": 5
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_session_by_owner() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let session_id = app.create_session(&trainer_token, "Old Name", &tomorrow(), 5).await;

    let res = app.put(&format!("/api/sessions/update/{}", session_id), Some(&trainer_token), serde_json::json!({
        "name": "New Name", "capacity": 8
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["session"]["name"], "New Name");
    assert_eq!(body["session"]["capacity"], 8);
}

#[tokio::test]
async fn test_update_session_by_other_trainer_is_forbidden() {
    let app = TestApp::new().await;
    let (owner_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (other_token, _) = app.register_trainer("Uma", "uma@gym.com", "Boxing").await;
    let session_id = app.create_session(&owner_token, "Protected", &tomorrow(), 5).await;

    let res = app.put(&format!("/api/sessions/update/{}", session_id), Some(&other_token), serde_json::json!({
        "capacity": 99
    })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Capacity unchanged.
    let res = app.get(&format!("/api/sessions/{}", session_id), None).await;
    let body = parse_body(res).await;
    assert_eq!(body["capacity"], 5);
}

#[tokio::test]
async fn test_update_missing_session_is_not_found() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;

    let res = app.put("/api/sessions/update/missing", Some(&trainer_token), serde_json::json!({
        "capacity": 3
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session_cascades_registrations() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_a, _) = app.register_member("Alice", "alice@gym.com").await;
    let (member_b, _) = app.register_member("Bob", "bob@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Doomed", &tomorrow(), 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_a), serde_json::json!({})).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_b), serde_json::json!({})).await;

    let res = app.delete(&format!("/api/sessions/delete/{}", session_id), Some(&trainer_token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // No residual registrations for either member.
    let res = app.get("/api/members/bookings", Some(&member_a)).await;
    let body = parse_body(res).await;
    assert_eq!(body["bookings"].as_array().unwrap().len(), 0);

    let count = app.state.session_repo.count_registrations(&session_id).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_delete_session_by_other_trainer_is_forbidden() {
    let app = TestApp::new().await;
    let (owner_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (other_token, _) = app.register_trainer("Uma", "uma@gym.com", "Boxing").await;
    let session_id = app.create_session(&owner_token, "Protected", &tomorrow(), 5).await;

    let res = app.delete(&format!("/api/sessions/delete/{}", session_id), Some(&other_token)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.get(&format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_can_delete_any_session() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let session_id = app.create_session(&trainer_token, "Admin Target", &tomorrow(), 5).await;

    let admin_token = app.admin_token().await;
    let res = app.delete(&format!("/api/sessions/delete/{}", session_id), Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_sessions_ordered_with_registrations() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let later = (Utc::now() + Duration::days(3)).to_rfc3339();
    let sooner = (Utc::now() + Duration::days(1)).to_rfc3339();

    let late_id = app.create_session(&trainer_token, "Later", &later, 5).await;
    let soon_id = app.create_session(&trainer_token, "Sooner", &sooner, 5).await;
    app.post(&format!("/api/sessions/{}/book", soon_id), Some(&member_token), serde_json::json!({})).await;

    let res = app.get("/api/sessions/my-sessions", Some(&trainer_token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    // Schedule ascending.
    assert_eq!(sessions[0]["id"], soon_id.as_str());
    assert_eq!(sessions[1]["id"], late_id.as_str());
    assert_eq!(sessions[0]["registrations"].as_array().unwrap().len(), 1);
    assert_eq!(sessions[0]["registrations"][0]["member_name"], "Alice");
}

#[tokio::test]
async fn test_session_detail_includes_trainer_and_status() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let session_id = app.create_session(&trainer_token, "Detail", &tomorrow(), 5).await;

    let res = app.get(&format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["trainer"]["name"], "Tom");
    assert_eq!(body["trainer"]["speciality"], "Yoga");
    assert_eq!(body["status"], "upcoming");
}

#[tokio::test]
async fn test_registrants_listing_is_ownership_checked() {
    let app = TestApp::new().await;
    let (owner_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (other_token, _) = app.register_trainer("Uma", "uma@gym.com", "Boxing").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let session_id = app.create_session(&owner_token, "Private List", &tomorrow(), 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;

    let res = app.get(&format!("/api/sessions/{}/members", session_id), Some(&other_token)).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.get(&format!("/api/sessions/{}/members", session_id), Some(&owner_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["member_email"], "alice@gym.com");
}
