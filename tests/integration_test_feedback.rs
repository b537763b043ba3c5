mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};

#[tokio::test]
async fn test_feedback_round_trip() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    // A session in the past; feedback typically follows attendance.
    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let session_id = app.create_session(&trainer_token, "Past Class", &yesterday, 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;

    let res = app.post(&format!("/api/sessions/{}/feedback", session_id), Some(&member_token), serde_json::json!({
        "feedback": "Great session"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/sessions/{}/feedback", session_id), Some(&member_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["feedback"], "Great session");
}

#[tokio::test]
async fn test_feedback_overwrites_previous() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let session_id = app.create_session(&trainer_token, "Past Class", &yesterday, 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_token), serde_json::json!({})).await;

    for text in ["First impression", "Revised opinion"] {
        let res = app.post(&format!("/api/sessions/{}/feedback", session_id), Some(&member_token), serde_json::json!({
            "feedback": text
        })).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app.get(&format!("/api/sessions/{}/feedback", session_id), Some(&member_token)).await;
    let body = parse_body(res).await;
    assert_eq!(body["feedback"], "Revised opinion");
}

#[tokio::test]
async fn test_feedback_requires_registration() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (registered, _) = app.register_member("Alice", "alice@gym.com").await;
    let (unregistered, _) = app.register_member("Bob", "bob@gym.com").await;

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let session_id = app.create_session(&trainer_token, "Past Class", &yesterday, 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&registered), serde_json::json!({})).await;

    // Member who never booked cannot attach or read feedback.
    let res = app.post(&format!("/api/sessions/{}/feedback", session_id), Some(&unregistered), serde_json::json!({
        "feedback": "I wasn't even there"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.get(&format!("/api/sessions/{}/feedback", session_id), Some(&unregistered)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_is_isolated_per_member() {
    let app = TestApp::new().await;
    let (trainer_token, _) = app.register_trainer("Tom", "tom@gym.com", "Yoga").await;
    let (member_a, _) = app.register_member("Alice", "alice@gym.com").await;
    let (member_b, _) = app.register_member("Bob", "bob@gym.com").await;

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    let session_id = app.create_session(&trainer_token, "Shared Class", &yesterday, 5).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_a), serde_json::json!({})).await;
    app.post(&format!("/api/sessions/{}/book", session_id), Some(&member_b), serde_json::json!({})).await;

    app.post(&format!("/api/sessions/{}/feedback", session_id), Some(&member_a), serde_json::json!({
        "feedback": "Loved it"
    })).await;

    let res = app.get(&format!("/api/sessions/{}/feedback", session_id), Some(&member_b)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["feedback"].is_null(), "B must not see A's feedback");

    // The trainer sees feedback per registrant.
    let res = app.get(&format!("/api/sessions/{}/members", session_id), Some(&trainer_token)).await;
    let body = parse_body(res).await;
    let alice = body.as_array().unwrap().iter().find(|r| r["member_name"] == "Alice").unwrap();
    assert_eq!(alice["feedback"], "Loved it");
}
