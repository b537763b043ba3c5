use gym_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::ports::EmailService,
    domain::services::token_service::TokenService,
    error::AppError,
    infra::repositories::{
        sqlite_member_repo::SqliteMemberRepo,
        sqlite_trainer_repo::SqliteTrainerRepo,
        sqlite_session_repo::SqliteSessionRepo,
        sqlite_equipment_repo::SqliteEquipmentRepo,
        sqlite_plan_repo::SqlitePlanRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_attendance_repo::SqliteAttendanceRepo,
        sqlite_verification_repo::SqliteVerificationRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, _recipient: &str, _subject: &str, _html_body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("welcome.html", "<html>Welcome {{ name }}</html>").unwrap();
        tera.add_raw_template("confirmation.html", "<html>Booked {{ session_name }} for {{ name }}</html>").unwrap();
        tera.add_raw_template("payment.html", "<html>Payment of {{ amount }} for {{ plan_name }}</html>").unwrap();
        tera.add_raw_template("verification.html", "<html>Code: {{ code }}</html>").unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            admin_email: "admin@gym.local".to_string(),
            admin_password: "admin-secret".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
        };

        let token_service = Arc::new(TokenService::new(&config.jwt_secret));

        let state = Arc::new(AppState {
            config: config.clone(),
            member_repo: Arc::new(SqliteMemberRepo::new(pool.clone())),
            trainer_repo: Arc::new(SqliteTrainerRepo::new(pool.clone())),
            session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
            equipment_repo: Arc::new(SqliteEquipmentRepo::new(pool.clone())),
            plan_repo: Arc::new(SqlitePlanRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            attendance_repo: Arc::new(SqliteAttendanceRepo::new(pool.clone())),
            verification_repo: Arc::new(SqliteVerificationRepo::new(pool.clone())),
            token_service,
            email_service: Arc::new(MockEmailService),
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> axum::response::Response {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> axum::response::Response {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> axum::response::Response {
        self.request("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> axum::response::Response {
        self.request("DELETE", uri, token, None).await
    }

    /// Registers a member through the API and returns (token, id).
    pub async fn register_member(&self, name: &str, email: &str) -> (String, String) {
        let res = self.post("/api/members/register", None, serde_json::json!({
            "name": name, "email": email, "password": "password123", "age": 30
        })).await;
        assert!(res.status().is_success(), "member registration failed: {}", res.status());
        let body = parse_body(res).await;
        (body["token"].as_str().unwrap().to_string(), body["id"].as_str().unwrap().to_string())
    }

    /// Registers a trainer through the API and returns (token, id).
    pub async fn register_trainer(&self, name: &str, email: &str, speciality: &str) -> (String, String) {
        let res = self.post("/api/trainers/register", None, serde_json::json!({
            "name": name, "email": email, "password": "password123", "age": 35, "speciality": speciality
        })).await;
        assert!(res.status().is_success(), "trainer registration failed: {}", res.status());
        let body = parse_body(res).await;
        (body["token"].as_str().unwrap().to_string(), body["id"].as_str().unwrap().to_string())
    }

    pub async fn admin_token(&self) -> String {
        let res = self.post("/api/admin/login", None, serde_json::json!({
            "email": "admin@gym.local", "password": "admin-secret"
        })).await;
        assert!(res.status().is_success(), "admin login failed: {}", res.status());
        let body = parse_body(res).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a session as the given trainer and returns its id.
    pub async fn create_session(&self, trainer_token: &str, name: &str, schedule: &str, capacity: i32) -> String {
        let res = self.post("/api/sessions", Some(trainer_token), serde_json::json!({
            "name": name, "schedule": schedule, "capacity": capacity, "description": "test session"
        })).await;
        assert!(res.status().is_success(), "session creation failed: {}", res.status());
        let body = parse_body(res).await;
        body["session"]["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
