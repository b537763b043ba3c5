use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::MemberUser;
use crate::api::dtos::requests::{
    RegisterMemberRequest, LoginRequest, RequestVerificationRequest, ConfirmVerificationRequest,
};
use crate::api::dtos::responses::AuthResponse;
use crate::domain::models::auth::Role;
use crate::domain::models::member::Member;
use crate::domain::services::{session_status::session_status, verification};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use chrono::Utc;
use rand::rngs::OsRng;
use tracing::{info, warn};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Name, email and password are required".into()));
    }

    if state.member_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let member = Member::new(payload.name, payload.email, password_hash, payload.age);
    let created = state.member_repo.create(&member).await?;

    let token = state.token_service.issue(&created.id, Role::Member, &created.email)?;

    send_welcome_email(&state, &created).await;

    info!("Registered member: {}", created.id);

    Ok((StatusCode::CREATED, Json(AuthResponse {
        message: "Registration successful".to_string(),
        token,
        id: created.id,
        name: created.name,
        email: created.email,
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&member.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.token_service.issue(&member.id, Role::Member, &member.email)?;

    info!("Member logged in: {}", member.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        id: member.id,
        name: member.name,
        email: member.email,
    }))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Member not found".into()))?;

    let membership = match &member.membership_id {
        Some(plan_id) => state.plan_repo.find_by_id(plan_id).await?,
        None => None,
    };

    Ok(Json(serde_json::json!({
        "member": member,
        "membership": membership
    })))
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.session_repo.list_member_bookings(&principal.id).await?;
    let now = Utc::now();

    let bookings: Vec<_> = bookings.into_iter().map(|b| {
        let status = session_status(b.schedule, now);
        serde_json::json!({
            "id": b.registration_id,
            "status": status,
            "booking_date": b.booked_at,
            "feedback": b.feedback,
            "session_details": {
                "id": b.session_id,
                "name": b.session_name,
                "description": b.description,
                "schedule": b.schedule,
                "capacity": b.capacity,
                "trainer": {
                    "id": b.trainer_id,
                    "name": b.trainer_name,
                    "speciality": b.trainer_speciality
                }
            }
        })
    }).collect();

    Ok(Json(serde_json::json!({
        "message": "Bookings retrieved successfully",
        "bookings": bookings
    })))
}

pub async fn request_verification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RequestVerificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }

    let record = verification::new_code(&payload.email);
    state.verification_repo.upsert(&record).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("code", &record.code);
    match state.templates.render("verification.html", &ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(&payload.email, "Gym Registration Verification Code", &body).await {
                warn!("Failed to send verification email to {}: {}", payload.email, e);
            }
        }
        Err(e) => warn!("Failed to render verification email: {}", e),
    }

    Ok(Json(serde_json::json!({"message": "Verification code sent"})))
}

pub async fn confirm_verification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfirmVerificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.verification_repo.find(&payload.email).await?
        .ok_or(AppError::Validation("No verification code requested".into()))?;

    if verification::is_expired(&record, Utc::now()) {
        state.verification_repo.delete(&payload.email).await?;
        return Err(AppError::Validation("Verification code expired".into()));
    }

    if record.code != payload.code {
        return Err(AppError::Validation("Invalid verification code".into()));
    }

    state.verification_repo.delete(&payload.email).await?;

    Ok(Json(serde_json::json!({"message": "Email verified"})))
}

async fn send_welcome_email(state: &Arc<AppState>, member: &Member) {
    let mut ctx = tera::Context::new();
    ctx.insert("name", &member.name);

    match state.templates.render("welcome.html", &ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(&member.email, "Welcome to Our Gym!", &body).await {
                warn!("Failed to send welcome email to {}: {}", member.email, e);
            }
        }
        Err(e) => warn!("Failed to render welcome email: {}", e),
    }
}
