use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, MemberUser};
use crate::api::dtos::requests::{CreatePlanRequest, UpdatePlanRequest, PurchasePlanRequest};
use crate::domain::models::membership::{MembershipPlan, Payment};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{Months, Utc};
use tracing::{info, warn};

fn features_json(features: Option<Vec<String>>) -> Result<String, AppError> {
    serde_json::to_string(&features.unwrap_or_default())
        .map_err(|_| AppError::Validation("Invalid features list".into()))
}

pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.plan_name.is_empty() {
        return Err(AppError::Validation("Plan name, duration, and cost are required".into()));
    }
    if payload.duration_months <= 0 || payload.cost <= 0 {
        return Err(AppError::Validation("Duration and cost must be positive".into()));
    }

    let plan = MembershipPlan::new(
        payload.plan_name,
        payload.duration_months,
        payload.cost,
        features_json(payload.features)?,
    );
    let created = state.plan_repo.create(&plan).await?;

    info!("Membership plan created: {}", created.id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Membership plan created successfully",
        "plan": created
    }))))
}

pub async fn update_plan(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(plan_id): Path<String>,
    Json(payload): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut plan = state.plan_repo.find_by_id(&plan_id).await?
        .ok_or(AppError::NotFound("Membership plan not found".into()))?;

    if let Some(name) = payload.plan_name { plan.plan_name = name; }
    if let Some(duration) = payload.duration_months {
        if duration <= 0 {
            return Err(AppError::Validation("Duration must be positive".into()));
        }
        plan.duration_months = duration;
    }
    if let Some(cost) = payload.cost {
        if cost <= 0 {
            return Err(AppError::Validation("Cost must be positive".into()));
        }
        plan.cost = cost;
    }
    if let Some(features) = payload.features {
        plan.features = features_json(Some(features))?;
    }

    let updated = state.plan_repo.update(&plan).await?;

    Ok(Json(serde_json::json!({
        "message": "Membership plan updated successfully",
        "plan": updated
    })))
}

pub async fn delete_plan(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.plan_repo.delete(&plan_id).await?;

    info!("Membership plan deleted: {}", plan_id);

    Ok(Json(serde_json::json!({
        "message": "Membership plan deleted successfully"
    })))
}

pub async fn list_plans_admin(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let plans = state.plan_repo.list_all().await?;

    let mut out = Vec::with_capacity(plans.len());
    for plan in plans {
        let member_count = state.plan_repo.member_count(&plan.id).await?;
        out.push(serde_json::json!({
            "id": plan.id,
            "plan_name": plan.plan_name,
            "duration_months": plan.duration_months,
            "cost": plan.cost,
            "features": plan.features,
            "member_count": member_count
        }));
    }

    Ok(Json(serde_json::json!({
        "message": "All membership plans retrieved successfully",
        "plans": out
    })))
}

pub async fn list_plans(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let plans = state.plan_repo.list_all().await?;

    Ok(Json(serde_json::json!({
        "message": "Membership plans retrieved successfully",
        "plans": plans
    })))
}

pub async fn purchase_plan(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
    Path(plan_id): Path<String>,
    Json(payload): Json<PurchasePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let plan = state.plan_repo.find_by_id(&plan_id).await?
        .ok_or(AppError::NotFound("Membership plan not found".into()))?;

    let mut member = state.member_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Member not found".into()))?;

    let start = Utc::now();
    let end = start.checked_add_months(Months::new(plan.duration_months as u32))
        .ok_or(AppError::Validation("Plan duration out of range".into()))?;

    let payment = Payment::new(member.id.clone(), plan.id.clone(), plan.cost, payload.payment_mode);
    let payment = state.payment_repo.create(&payment).await?;

    member.membership_id = Some(plan.id.clone());
    member.plan_start = Some(start);
    member.plan_end = Some(end);
    let member = state.member_repo.update(&member).await?;

    info!("Member {} purchased plan {}", member.id, plan.id);

    send_payment_email(&state, &member.name, &member.email, &plan.plan_name, payment.amount).await;

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Membership purchased successfully",
        "membership": {
            "plan": plan.plan_name,
            "start_date": member.plan_start,
            "end_date": member.plan_end,
            "cost": payment.amount,
            "payment_id": payment.id
        }
    }))))
}

pub async fn membership_status(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::NotFound("Member not found".into()))?;

    let now = Utc::now();
    if !member.has_active_membership(now) {
        return Ok(Json(serde_json::json!({
            "message": "No active membership found",
            "has_active_membership": false
        })));
    }

    let plan_id = member.membership_id.as_deref().unwrap_or_default();
    let plan = state.plan_repo.find_by_id(plan_id).await?
        .ok_or(AppError::NotFound("Membership plan not found".into()))?;

    let end = member.plan_end.unwrap_or(now);
    let days_remaining = (end - now).num_days().max(0);

    Ok(Json(serde_json::json!({
        "message": "Membership status retrieved successfully",
        "has_active_membership": true,
        "membership": {
            "plan": plan.plan_name,
            "start_date": member.plan_start,
            "end_date": member.plan_end,
            "days_remaining": days_remaining
        }
    })))
}

pub async fn purchase_history(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list_by_member(&principal.id).await?;

    let purchases: Vec<_> = payments.into_iter().map(|p| serde_json::json!({
        "id": p.id,
        "plan": p.plan_name,
        "amount": p.amount,
        "payment_date": p.paid_at,
        "payment_mode": p.payment_mode
    })).collect();

    Ok(Json(serde_json::json!({
        "message": "Purchase history retrieved successfully",
        "purchases": purchases
    })))
}

async fn send_payment_email(state: &Arc<AppState>, name: &str, email: &str, plan_name: &str, amount: i64) {
    let mut ctx = tera::Context::new();
    ctx.insert("name", name);
    ctx.insert("plan_name", plan_name);
    ctx.insert("amount", &amount);

    match state.templates.render("payment.html", &ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(email, "Payment Confirmation", &body).await {
                warn!("Failed to send payment confirmation to {}: {}", email, e);
            }
        }
        Err(e) => warn!("Failed to render payment confirmation: {}", e),
    }
}
