use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, MemberUser};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;

pub async fn payment_history(
    State(state): State<Arc<AppState>>,
    MemberUser(principal): MemberUser,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list_by_member(&principal.id).await?;
    Ok(Json(payments))
}

pub async fn all_payments(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list_all().await?;
    Ok(Json(payments))
}

pub async fn revenue_and_active_memberships(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let total_revenue = state.payment_repo.total_revenue().await?;
    let active_memberships = state.plan_repo.active_member_counts(Utc::now()).await?;

    Ok(Json(serde_json::json!({
        "total_revenue": total_revenue,
        "active_memberships": active_memberships
    })))
}
