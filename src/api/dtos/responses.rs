use serde::Serialize;

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub total_trainers: i64,
    pub total_sessions: i64,
    pub today_attendance: i64,
}
