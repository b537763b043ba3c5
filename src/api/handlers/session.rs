use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{MemberUser, StaffUser, TrainerUser};
use crate::api::dtos::requests::{CreateSessionRequest, UpdateSessionRequest, FeedbackRequest};
use crate::domain::models::auth::Role;
use crate::domain::models::session::{Session, Registration, SessionWithTrainer};
use crate::domain::services::session_status::session_status;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

fn parse_schedule(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::Validation("Invalid schedule timestamp (expected RFC 3339)".into()))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_empty() {
        return Err(AppError::Validation("Session name is required".into()));
    }
    if payload.capacity <= 0 {
        return Err(AppError::Validation("Capacity must be a positive integer".into()));
    }

    let schedule = parse_schedule(&payload.schedule)?;

    let session = Session::new(
        principal.id,
        payload.name,
        schedule,
        payload.capacity,
        payload.description.unwrap_or_default(),
    );
    let created = state.session_repo.create(&session).await?;

    info!("Session created: {} by trainer {}", created.id, created.trainer_id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Session created successfully",
        "session": created
    }))))
}

pub async fn update_session(
    State(state): State<Arc<AppState>>,
    StaffUser(principal): StaffUser,
    Path(session_id): Path<String>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if principal.role != Role::Admin && session.trainer_id != principal.id {
        return Err(AppError::Forbidden("Not authorized to update this session".into()));
    }

    if let Some(name) = payload.name { session.name = name; }
    if let Some(schedule) = payload.schedule { session.schedule = parse_schedule(&schedule)?; }
    if let Some(capacity) = payload.capacity {
        if capacity <= 0 {
            return Err(AppError::Validation("Capacity must be a positive integer".into()));
        }
        session.capacity = capacity;
    }
    if let Some(description) = payload.description { session.description = description; }

    let updated = state.session_repo.update(&session).await?;

    info!("Session updated: {}", updated.id);

    Ok(Json(serde_json::json!({
        "message": "Session updated successfully",
        "session": updated
    })))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    StaffUser(principal): StaffUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if principal.role != Role::Admin && session.trainer_id != principal.id {
        return Err(AppError::Forbidden("Not authorized to delete this session".into()));
    }

    state.session_repo.delete_with_registrations(&session.id).await?;

    info!("Session deleted with registrations: {}", session.id);

    Ok(Json(serde_json::json!({
        "message": "Session and related registrations deleted successfully",
        "deleted_session_id": session.id
    })))
}

pub async fn my_sessions(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_by_trainer(&principal.id).await?;
    let now = Utc::now();

    let mut out = Vec::with_capacity(sessions.len());
    for session in sessions {
        let registrants = state.session_repo.list_registrants(&session.id).await?;
        out.push(serde_json::json!({
            "id": session.id,
            "name": session.name,
            "schedule": session.schedule,
            "capacity": session.capacity,
            "description": session.description,
            "status": session_status(session.schedule, now),
            "registrations": registrants
        }));
    }

    Ok(Json(out))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    _member: MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_with_trainer().await?;
    let now = Utc::now();

    let out: Vec<_> = sessions.into_iter().map(|s| with_status(s, now)).collect();
    Ok(Json(out))
}

pub async fn available_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_available().await?;

    Ok(Json(serde_json::json!({
        "message": "Available sessions retrieved successfully",
        "sessions": sessions
    })))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_detail(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    Ok(Json(with_status(session, Utc::now())))
}

pub async fn book_session(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_detail(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if state.session_repo.find_registration(&principal.id, &session_id).await?.is_some() {
        return Err(AppError::Conflict("You have already booked this session".into()));
    }

    // The repository re-checks capacity inside the same transaction as the
    // insert; the (member, session) unique index is the final arbiter for
    // duplicate bookings racing past the check above.
    let registration = Registration::new(principal.id.clone(), session_id.clone());
    let created = state.session_repo.register_member(&registration).await?;

    info!("Member {} booked session {}", principal.id, session_id);

    send_confirmation_email(&state, &principal.id, &session).await;

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Session booked successfully",
        "registration": {
            "id": created.id,
            "session_details": {
                "id": session.id,
                "name": session.name,
                "description": session.description,
                "schedule": session.schedule,
                "capacity": session.capacity,
                "trainer": {
                    "id": session.trainer_id,
                    "name": session.trainer_name,
                    "speciality": session.trainer_speciality
                }
            }
        }
    }))))
}

pub async fn add_feedback(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Path(session_id): Path<String>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.session_repo.find_registration(&principal.id, &session_id).await?
        .ok_or(AppError::NotFound("Registration not found".into()))?;

    let updated = state.session_repo.set_feedback(&principal.id, &session_id, &payload.feedback).await?;

    Ok(Json(serde_json::json!({
        "message": "Feedback added successfully",
        "registration": updated
    })))
}

pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.session_repo.find_registration(&principal.id, &session_id).await?
        .ok_or(AppError::NotFound("Registration not found".into()))?;

    Ok(Json(serde_json::json!({ "feedback": registration.feedback })))
}

pub async fn get_registrants(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if session.trainer_id != principal.id {
        return Err(AppError::Forbidden("Not authorized to view this session's registrations".into()));
    }

    let registrants = state.session_repo.list_registrants(&session_id).await?;
    Ok(Json(registrants))
}

fn with_status(session: SessionWithTrainer, now: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "id": session.id,
        "name": session.name,
        "schedule": session.schedule,
        "capacity": session.capacity,
        "description": session.description,
        "status": session_status(session.schedule, now),
        "trainer": {
            "id": session.trainer_id,
            "name": session.trainer_name,
            "speciality": session.trainer_speciality
        }
    })
}

async fn send_confirmation_email(state: &Arc<AppState>, member_id: &str, session: &SessionWithTrainer) {
    let member = match state.member_repo.find_by_id(member_id).await {
        Ok(Some(m)) => m,
        Ok(None) => return,
        Err(e) => {
            warn!("Failed to load member {} for confirmation email: {}", member_id, e);
            return;
        }
    };

    let mut ctx = tera::Context::new();
    ctx.insert("name", &member.name);
    ctx.insert("session_name", &session.name);
    ctx.insert("schedule", &session.schedule.to_rfc3339());
    ctx.insert("trainer_name", &session.trainer_name);

    match state.templates.render("confirmation.html", &ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(&member.email, "Session Booking Confirmation", &body).await {
                warn!("Failed to send booking confirmation to {}: {}", member.email, e);
            }
        }
        Err(e) => warn!("Failed to render booking confirmation: {}", e),
    }
}
