mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};

fn tomorrow() -> String {
    (Utc::now() + Duration::days(1)).to_rfc3339()
}

#[tokio::test]
async fn test_booking_success_returns_detail() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Morning Yoga", &tomorrow(), 10).await;

    let res = app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["registration"]["session_details"]["name"], "Morning Yoga");
    assert_eq!(body["registration"]["session_details"]["trainer"]["name"], "Tom");
    assert_eq!(body["registration"]["session_details"]["trainer"]["speciality"], "Yoga");
}

#[tokio::test]
async fn test_booking_unknown_session_is_not_found() {
    let app = TestApp::new().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let res = app.post("/api/sessions/does-not-exist/book", Some(&member_token), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capacity_is_enforced() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_a, _) = app.register_member("Alice", "alice@gym.com").await;
    let (member_b, _) = app.register_member("Bob", "bob@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Tiny Class", &tomorrow(), 1).await;

    let res = app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_a), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_b), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("full"));
}

#[tokio::test]
async fn test_double_booking_is_conflict() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, member_id) = app.register_member("Alice", "alice@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Spin", &tomorrow(), 5).await;

    let res = app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("already booked"));

    // Still exactly one registration row.
    let count = app.state.session_repo.count_registrations(&session_id).await.unwrap();
    assert_eq!(count, 1);

    let registration = app.state.session_repo.find_registration(&member_id, &session_id).await.unwrap();
    assert!(registration.is_some());
}

#[tokio::test]
async fn test_concurrent_bookings_for_last_slot() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_a, _) = app.register_member("Alice", "alice@gym.com").await;
    let (member_b, _) = app.register_member("Bob", "bob@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Last Slot", &tomorrow(), 1).await;

    let uri = format!("/api/sessions/{}/book", session_id);
    let (res_a, res_b) = tokio::join!(
        app.post(&uri, Some(&member_a), serde_json::json!({})),
        app.post(&uri, Some(&member_b), serde_json::json!({})),
    );

    let successes = [res_a.status(), res_b.status()]
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(successes, 1, "exactly one of two concurrent bookings must win");

    let count = app.state.session_repo.count_registrations(&session_id).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_member_bookings_listing() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let session_id = app.create_session(&trainer_token, "Pilates", &tomorrow(), 3).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;

    let res = app.get("/api/members/bookings", Some(&member_token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["session_details"]["name"], "Pilates");
    assert_eq!(bookings[0]["status"], "upcoming");
}

#[tokio::test]
async fn test_available_sessions_excludes_full() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let full_id = app.create_session(&trainer_token, "Full Class", &tomorrow(), 1).await;
    let open_id = app.create_session(&trainer_token, "Open Class", &tomorrow(), 2).await;

    app.post(&format!("/api/sessions/{}/book", full_id), Some(&member_token), serde_json::json!({})).await;
    app.post(&format!("/api/sessions/{}/book", open_id), Some(&member_token), serde_json::json!({})).await;

    // Public endpoint, no token.
    let res = app.get("/api/sessions/available", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let sessions = body["sessions"].as_array().unwrap();

    let ids: Vec<&str> = sessions.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert!(!ids.contains(&full_id.as_str()), "full session must not be listed");
    assert!(ids.contains(&open_id.as_str()));

    let open = sessions.iter().find(|s| s["id"] == open_id.as_str()).unwrap();
    assert_eq!(open["available_spots"], 1);
    assert_eq!(open["trainer_name"], "Tom");
}
