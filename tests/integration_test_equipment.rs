mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

async fn add_equipment(app: &TestApp, admin_token: &str, name: &str, quantity: i32) -> String {
    let res = app.post("/api/equipment", Some(admin_token), serde_json::json!({
        "name": name, "category": "Cardio", "quantity": quantity, "status": "operational"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    body["equipment"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_equipment_admin_crud() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;

    let id = add_equipment(&app, &admin_token, "Treadmill", 4).await;

    let res = app.put(&format!("/api/equipment/{}", id), Some(&admin_token), serde_json::json!({
        "status": "maintenance", "quantity": 3
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["equipment"]["status"], "maintenance");
    assert_eq!(body["equipment"]["quantity"], 3);

    let res = app.get("/api/equipment/getAll", Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_member_cannot_manage_equipment() {
    let app = TestApp::new().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let res = app.post("/api/equipment", Some(&member_token), serde_json::json!({
        "name": "Rogue Rack", "category": "Strength", "quantity": 1, "status": "operational"
    })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_usage_recording_and_history() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let id = add_equipment(&app, &admin_token, "Rowing Machine", 2).await;

    let res = app.post("/api/equipment/usage", Some(&member_token), serde_json::json!({
        "equipment_id": id, "date": "2026-08-01", "time": "09:30", "duration_min": 25
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Unknown equipment is rejected.
    let res = app.post("/api/equipment/usage", Some(&member_token), serde_json::json!({
        "equipment_id": "missing", "date": "2026-08-01", "time": "09:30", "duration_min": 25
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Malformed date is rejected.
    let res = app.post("/api/equipment/usage", Some(&member_token), serde_json::json!({
        "equipment_id": id, "date": "01/08/2026", "time": "09:30", "duration_min": 25
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/api/equipment/usage/history", Some(&member_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["equipment_name"], "Rowing Machine");
}

#[tokio::test]
async fn test_equipment_stats() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let id = add_equipment(&app, &admin_token, "Bike", 2).await;

    for (time, duration) in [("08:00", 20), ("18:00", 40)] {
        app.post("/api/equipment/usage", Some(&member_token), serde_json::json!({
            "equipment_id": id, "date": "2026-08-01", "time": time, "duration_min": duration
        })).await;
    }

    let res = app.get(&format!("/api/equipment/stats/{}", id), Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["usage_count"], 2);
    assert_eq!(body["total_duration_min"], 60);

    let res = app.get("/api/equipment/stats/overview", Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let bike = &body.as_array().unwrap()[0];
    assert_eq!(bike["total_usages"], 2);
    assert_eq!(bike["average_duration"], 30.0);
    assert_eq!(bike["recent_usages"].as_array().unwrap().len(), 2);

    let res = app.get(
        "/api/equipment/stats/usage-by-date?start_date=2026-07-31&end_date=2026-08-02",
        Some(&admin_token),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let group = &body.as_array().unwrap()[0];
    assert_eq!(group["total_usages"], 2);
    assert_eq!(group["total_duration_min"], 60);
}
