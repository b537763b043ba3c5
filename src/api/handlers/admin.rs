use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::LoginRequest;
use crate::api::dtos::responses::DashboardStats;
use crate::domain::models::auth::Role;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Admin is env-credentialed; there is no admin table.
    if payload.email != state.config.admin_email || payload.password != state.config.admin_password {
        return Err(AppError::Unauthorized);
    }

    let token = state.token_service.issue("admin", Role::Admin, &state.config.admin_email)?;

    info!("Admin logged in");

    Ok(Json(serde_json::json!({
        "message": "Admin login successful",
        "token": token
    })))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let members = state.member_repo.list_all().await?;

    let mut out = Vec::with_capacity(members.len());
    for member in members {
        let membership = match &member.membership_id {
            Some(plan_id) => state.plan_repo.find_by_id(plan_id).await?,
            None => None,
        };
        let payments = state.payment_repo.list_by_member(&member.id).await?;
        let attendance = state.attendance_repo.list_by_member(&member.id, None).await?;
        let recent_attendance: Vec<_> = attendance.into_iter().take(5).collect();

        out.push(serde_json::json!({
            "id": member.id,
            "name": member.name,
            "email": member.email,
            "age": member.age,
            "plan_start": member.plan_start,
            "plan_end": member.plan_end,
            "created_at": member.created_at,
            "membership": membership,
            "payments": payments,
            "attendance": recent_attendance
        }));
    }

    Ok(Json(out))
}

pub async fn list_trainers(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let trainers = state.trainer_repo.list_all().await?;

    let mut out = Vec::with_capacity(trainers.len());
    for trainer in trainers {
        let sessions = state.session_repo.list_by_trainer(&trainer.id).await?;
        out.push(serde_json::json!({
            "id": trainer.id,
            "name": trainer.name,
            "email": trainer.email,
            "age": trainer.age,
            "speciality": trainer.speciality,
            "availability": trainer.availability,
            "created_at": trainer.created_at,
            "sessions": sessions
        }));
    }

    Ok(Json(out))
}

pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let total_members = state.member_repo.count().await?;
    let total_trainers = state.trainer_repo.count().await?;
    let total_sessions = state.session_repo.count().await?;
    let today_attendance = state.attendance_repo.count_for_day(Utc::now().date_naive()).await?;

    Ok(Json(DashboardStats {
        total_members,
        total_trainers,
        total_sessions,
        today_attendance,
    }))
}
