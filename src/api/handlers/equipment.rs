use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, MemberUser};
use crate::api::dtos::requests::{CreateEquipmentRequest, UpdateEquipmentRequest, RecordUsageRequest, DateRangeQuery};
use crate::domain::models::equipment::{Equipment, EquipmentUsage};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::info;

pub async fn add_equipment(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateEquipmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_empty() {
        return Err(AppError::Validation("Equipment name is required".into()));
    }
    if payload.quantity < 0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }

    let equipment = Equipment::new(payload.name, payload.category, payload.quantity, payload.status);
    let created = state.equipment_repo.create(&equipment).await?;

    info!("Equipment added: {}", created.id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Equipment added successfully",
        "equipment": created
    }))))
}

pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEquipmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut equipment = state.equipment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Equipment not found".into()))?;

    equipment.status = payload.status;
    if let Some(quantity) = payload.quantity { equipment.quantity = quantity; }

    let updated = state.equipment_repo.update(&equipment).await?;

    Ok(Json(serde_json::json!({
        "message": "Equipment updated successfully",
        "equipment": updated
    })))
}

pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let equipment = state.equipment_repo.list_all().await?;
    Ok(Json(equipment))
}

pub async fn record_usage(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Json(payload): Json<RecordUsageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.equipment_id.is_empty() || payload.date.is_empty() || payload.time.is_empty() {
        return Err(AppError::Validation("Equipment ID, date, and time are required".into()));
    }

    state.equipment_repo.find_by_id(&payload.equipment_id).await?
        .ok_or(AppError::NotFound("Equipment not found".into()))?;

    let used_on = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))?;

    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let used_at = Utc.from_utc_datetime(&used_on.and_time(time));

    if payload.duration_min <= 0 {
        return Err(AppError::Validation("Duration must be positive".into()));
    }

    let usage = EquipmentUsage::new(principal.id, payload.equipment_id, used_on, used_at, payload.duration_min);
    let created = state.equipment_repo.record_usage(&usage).await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Usage recorded successfully",
        "usage": created
    }))))
}

pub async fn usage_history(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let history = state.equipment_repo.list_usage_by_member(&principal.id).await?;
    Ok(Json(history))
}

pub async fn equipment_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.equipment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Equipment not found".into()))?;

    let stats = state.equipment_repo.usage_stats(&id).await?;

    Ok(Json(serde_json::json!({
        "equipment_id": id,
        "usage_count": stats.usage_count,
        "total_duration_min": stats.total_duration_min
    })))
}

pub async fn stats_overview(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let equipment = state.equipment_repo.list_all().await?;

    let mut out = Vec::with_capacity(equipment.len());
    for item in equipment {
        let stats = state.equipment_repo.usage_stats(&item.id).await?;
        let recent = state.equipment_repo.list_recent_usages(&item.id, 5).await?;

        let utilization_rate = if item.quantity > 0 {
            stats.usage_count as f64 / item.quantity as f64
        } else {
            0.0
        };
        let average_duration = if stats.usage_count > 0 {
            stats.total_duration_min as f64 / stats.usage_count as f64
        } else {
            0.0
        };

        out.push(serde_json::json!({
            "id": item.id,
            "name": item.name,
            "category": item.category,
            "status": item.status,
            "quantity": item.quantity,
            "total_usages": stats.usage_count,
            "recent_usages": recent,
            "utilization_rate": utilization_rate,
            "average_duration": average_duration
        }));
    }

    Ok(Json(out))
}

pub async fn usage_by_date_range(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let end = match query.end_date.as_deref() {
        Some(raw) => parse_day_end(raw)?,
        None => Utc::now(),
    };
    let start = match query.start_date.as_deref() {
        Some(raw) => parse_day_start(raw)?,
        None => end - Duration::days(30),
    };

    let usages = state.equipment_repo.list_usage_in_range(start, end).await?;

    // Group per equipment, as the admin report expects.
    let mut grouped: HashMap<String, Vec<_>> = HashMap::new();
    for usage in usages {
        grouped.entry(usage.equipment_id.clone()).or_default().push(usage);
    }

    let out: Vec<_> = grouped.into_iter().map(|(equipment_id, usages)| {
        let total_usages = usages.len() as i64;
        let total_duration: i64 = usages.iter().map(|u| u.duration_min as i64).sum();
        serde_json::json!({
            "equipment_id": equipment_id,
            "equipment_name": usages[0].equipment_name,
            "category": usages[0].category,
            "total_usages": total_usages,
            "total_duration_min": total_duration,
            "average_duration": total_duration as f64 / total_usages as f64,
            "usages": usages
        })
    }).collect();

    Ok(Json(out))
}

fn parse_day_start(raw: &str) -> Result<chrono::DateTime<Utc>, AppError> {
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))?;
    Ok(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).expect("midnight is valid")))
}

fn parse_day_end(raw: &str) -> Result<chrono::DateTime<Utc>, AppError> {
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))?;
    Ok(Utc.from_utc_datetime(&day.and_hms_opt(23, 59, 59).expect("end of day is valid")))
}
