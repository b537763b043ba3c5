use axum::{extract::{State, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, MemberUser};
use crate::api::dtos::requests::{DateRangeQuery, DayQuery};
use crate::domain::models::attendance::Attendance;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))
}

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();

    if state.attendance_repo.find_open_for_day(&principal.id, today).await?.is_some() {
        return Err(AppError::Conflict("Already checked in".into()));
    }

    let attendance = Attendance::check_in(principal.id);
    let created = state.attendance_repo.create(&attendance).await?;

    info!("Member {} checked in", created.member_id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Check-in successful",
        "attendance": created
    }))))
}

pub async fn check_out(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let open = state.attendance_repo.find_open(&principal.id).await?
        .ok_or(AppError::Conflict("No active check-in found".to_string()))?;

    let closed = state.attendance_repo.close(&open.id, Utc::now()).await?;

    info!("Member {} checked out", closed.member_id);

    Ok(Json(serde_json::json!({
        "message": "Check-out successful",
        "attendance": closed
    })))
}

pub async fn member_history(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => Some((parse_day(start)?, parse_day(end)?)),
        _ => None,
    };

    let records = state.attendance_repo.list_by_member(&principal.id, range).await?;
    Ok(Json(records))
}

pub async fn all_attendance(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<DayQuery>,
) -> Result<impl IntoResponse, AppError> {
    let day = match query.date.as_deref() {
        Some(raw) => Some(parse_day(raw)?),
        None => None,
    };

    let records = state.attendance_repo.list_all(day).await?;
    Ok(Json(records))
}

pub async fn attendance_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let end = match query.end_date.as_deref() {
        Some(raw) => parse_day(raw)?,
        None => Utc::now().date_naive(),
    };
    let start = match query.start_date.as_deref() {
        Some(raw) => parse_day(raw)?,
        None => end - Duration::days(30),
    };

    let detailed_stats = state.attendance_repo.stats_by_member(start, end).await?;
    let attendance_trends = state.attendance_repo.daily_counts(start, end).await?;

    let total_attendance: i64 = detailed_stats.iter().map(|s| s.attendance_count).sum();
    let average_attendance = if detailed_stats.is_empty() {
        0.0
    } else {
        total_attendance as f64 / detailed_stats.len() as f64
    };

    let most_active_members: Vec<_> = detailed_stats.iter().take(5).cloned().collect();

    Ok(Json(serde_json::json!({
        "total_attendance": total_attendance,
        "average_attendance": average_attendance,
        "detailed_stats": detailed_stats,
        "attendance_trends": attendance_trends,
        "most_active_members": most_active_members
    })))
}
