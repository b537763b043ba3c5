use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::TrainerUser;
use crate::api::dtos::requests::{
    RegisterTrainerRequest, LoginRequest, UpdateAvailabilityRequest, UpdateTrainerProfileRequest,
};
use crate::api::dtos::responses::AuthResponse;
use crate::domain::models::auth::Role;
use crate::domain::models::trainer::{Trainer, is_valid_availability};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterTrainerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Name, email and password are required".into()));
    }

    if state.trainer_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let trainer = Trainer::new(payload.name, payload.email, password_hash, payload.age, payload.speciality);
    let created = state.trainer_repo.create(&trainer).await?;

    let token = state.token_service.issue(&created.id, Role::Trainer, &created.email)?;

    info!("Registered trainer: {}", created.id);

    Ok((StatusCode::CREATED, Json(AuthResponse {
        message: "Trainer registered successfully".to_string(),
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
    let trainer = state.trainer_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&trainer.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.token_service.issue(&trainer.id, Role::Trainer, &trainer.email)?;

    info!("Trainer logged in: {}", trainer.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        id: trainer.id,
        name: trainer.name,
        email: trainer.email,
    }))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_availability(&payload.availability) {
        return Err(AppError::Validation("Availability must be a 7-character string of 0s and 1s".into()));
    }

    let mut trainer = state.trainer_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Trainer not found".into()))?;

    trainer.availability = payload.availability;
    let updated = state.trainer_repo.update(&trainer).await?;

    info!("Availability updated for trainer {}", updated.id);

    Ok(Json(serde_json::json!({
        "message": "Availability updated successfully",
        "trainer": updated
    })))
}

pub async fn get_sessions(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_by_trainer(&principal.id).await?;

    let mut out = Vec::with_capacity(sessions.len());
    for session in sessions {
        let registrants = state.session_repo.list_registrants(&session.id).await?;
        out.push(serde_json::json!({
            "id": session.id,
            "name": session.name,
            "schedule": session.schedule,
            "capacity": session.capacity,
            "description": session.description,
            "registrations": registrants
        }));
    }

    Ok(Json(out))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
    Json(payload): Json<UpdateTrainerProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut trainer = state.trainer_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Trainer not found".into()))?;

    if let Some(name) = payload.name { trainer.name = name; }
    if let Some(age) = payload.age { trainer.age = age; }
    if let Some(speciality) = payload.speciality { trainer.speciality = speciality; }

    let updated = state.trainer_repo.update(&trainer).await?;

    Ok(Json(serde_json::json!({
        "message": "Profile updated successfully",
        "trainer": updated
    })))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    TrainerUser(principal): TrainerUser,
) -> Result<impl IntoResponse, AppError> {
    let trainer = state.trainer_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Trainer not found".into()))?;

    Ok(Json(serde_json::json!({ "trainer": trainer })))
}

pub async fn get_public_profile(
    State(state): State<Arc<AppState>>,
    Path(trainer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trainer = state.trainer_repo.find_by_id(&trainer_id).await?
        .ok_or(AppError::NotFound("Trainer not found".into()))?;

    // Public view: identity and speciality only.
    Ok(Json(serde_json::json!({
        "trainer": {
            "id": trainer.id,
            "name": trainer.name,
            "speciality": trainer.speciality
        }
    })))
}
