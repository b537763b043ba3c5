use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

#[derive(Deserialize)]
pub struct RegisterTrainerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub speciality: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub availability: String,
}

#[derive(Deserialize)]
pub struct UpdateTrainerProfileRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub speciality: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub schedule: String,
    pub capacity: i32,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub name: Option<String>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

#[derive(Deserialize)]
pub struct CreateEquipmentRequest {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub status: String,
}

#[derive(Deserialize)]
pub struct UpdateEquipmentRequest {
    pub status: String,
    pub quantity: Option<i32>,
}

#[derive(Deserialize)]
pub struct RecordUsageRequest {
    pub equipment_id: String,
    pub date: String,
    pub time: String,
    pub duration_min: i32,
}

#[derive(Deserialize)]
pub struct CreatePlanRequest {
    pub plan_name: String,
    pub duration_months: i32,
    pub cost: i64,
    pub features: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdatePlanRequest {
    pub plan_name: Option<String>,
    pub duration_months: Option<i32>,
    pub cost: Option<i64>,
    pub features: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct PurchasePlanRequest {
    pub payment_mode: String,
}

#[derive(Deserialize)]
pub struct RequestVerificationRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ConfirmVerificationRequest {
    pub email: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}
