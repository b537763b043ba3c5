mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

async fn create_plan(app: &TestApp, admin_token: &str, name: &str, months: i32, cost: i64) -> String {
    let res = app.post("/api/memberships/plans", Some(admin_token), serde_json::json!({
        "plan_name": name, "duration_months": months, "cost": cost,
        "features": ["Sauna", "Pool"]
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    body["plan"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_plan_crud() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;

    let plan_id = create_plan(&app, &admin_token, "Gold", 12, 500).await;

    let res = app.put(&format!("/api/memberships/plans/{}", plan_id), Some(&admin_token), serde_json::json!({
        "cost": 550
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["plan"]["cost"], 550);

    // Plans are public.
    let res = app.get("/api/memberships/plans", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["plans"].as_array().unwrap().len(), 1);

    let res = app.delete(&format!("/api/memberships/plans/{}", plan_id), Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/memberships/plans", None).await;
    let body = parse_body(res).await;
    assert_eq!(body["plans"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_plan_validation() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;

    let res = app.post("/api/memberships/plans", Some(&admin_token), serde_json::json!({
        "plan_name": "", "duration_months": 12, "cost": 500
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post("/api/memberships/plans", Some(&admin_token), serde_json::json!({
        "plan_name": "Free", "duration_months": 0, "cost": 500
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_purchase_and_status() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let plan_id = create_plan(&app, &admin_token, "Gold", 3, 300).await;

    // No membership yet.
    let res = app.get("/api/memberships/my-membership", Some(&member_token)).await;
    let body = parse_body(res).await;
    assert_eq!(body["has_active_membership"], false);

    let res = app.post(&format!("/api/memberships/purchase/{}", plan_id), Some(&member_token), serde_json::json!({
        "payment_mode": "card"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["membership"]["plan"], "Gold");
    assert_eq!(body["membership"]["cost"], 300);

    let res = app.get("/api/memberships/my-membership", Some(&member_token)).await;
    let body = parse_body(res).await;
    assert_eq!(body["has_active_membership"], true);
    assert!(body["membership"]["days_remaining"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_purchase_unknown_plan_is_not_found() {
    let app = TestApp::new().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let res = app.post("/api/memberships/purchase/missing", Some(&member_token), serde_json::json!({
        "payment_mode": "card"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purchase_history_and_payments() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let gold = create_plan(&app, &admin_token, "Gold", 12, 500).await;
    let silver = create_plan(&app, &admin_token, "Silver", 6, 250).await;

    app.post(&format!("/api/memberships/purchase/{}", silver), Some(&member_token), serde_json::json!({"payment_mode": "cash"})).await;
    app.post(&format!("/api/memberships/purchase/{}", gold), Some(&member_token), serde_json::json!({"payment_mode": "card"})).await;

    let res = app.get("/api/memberships/purchase-history", Some(&member_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["purchases"].as_array().unwrap().len(), 2);

    let res = app.get("/api/payments/history", Some(&member_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Admin ledger and revenue.
    let res = app.get("/api/payments/all", Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["member_name"], "Alice");

    let res = app.get("/api/payments/revenue-and-active-memberships", Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["total_revenue"], 750);

    let counts = body["active_memberships"].as_array().unwrap();
    let gold_entry = counts.iter().find(|c| c["plan_name"] == "Gold").unwrap();
    assert_eq!(gold_entry["active_count"], 1);
    let silver_entry = counts.iter().find(|c| c["plan_name"] == "Silver").unwrap();
    assert_eq!(silver_entry["active_count"], 0);
}

#[tokio::test]
async fn test_admin_plan_listing_includes_member_counts() {
    let app = TestApp::new().await;
    let admin_token = app.admin_token().await;
    let (member_token, _) = app.register_member("Alice", "alice@gym.com").await;

    let plan_id = create_plan(&app, &admin_token, "Gold", 12, 500).await;
    app.post(&format!("/api/memberships/purchase/{}", plan_id), Some(&member_token), serde_json::json!({"payment_mode": "card"})).await;

    let res = app.get("/api/memberships/plans/all", Some(&admin_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["plans"][0]["member_count"], 1);
}
