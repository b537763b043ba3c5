use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::{Principal, Role};
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// Single authorization path for every role family. Validates the bearer
/// token, requires the role claim to be in `allowed`, and for members and
/// trainers confirms the principal still exists in the store.
async fn authorize(parts: &mut Parts, state: &Arc<AppState>, allowed: &[Role]) -> Result<Principal, AppError> {
    let header = parts.headers.get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let principal = state.token_service.verify(token)?;

    if !allowed.contains(&principal.role) {
        return Err(AppError::Forbidden(format!("Not authorized as {}", principal.role.as_str())));
    }

    match principal.role {
        Role::Member => {
            state.member_repo.find_by_id(&principal.id).await?
                .ok_or(AppError::Unauthorized)?;
        }
        Role::Trainer => {
            state.trainer_repo.find_by_id(&principal.id).await?
                .ok_or(AppError::Unauthorized)?;
        }
        Role::Admin => {}
    }

    Span::current().record("user_id", principal.id.as_str());
    Span::current().record("role", principal.role.as_str());

    Ok(principal)
}

macro_rules! role_extractor {
    ($name:ident, $allowed:expr) => {
        pub struct $name(pub Principal);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
            Arc<AppState>: FromRef<S>,
        {
            type Rejection = AppError;

            async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
                let principal = authorize(parts, &app_state, $allowed).await?;
                Ok($name(principal))
            }
        }
    };
}

role_extractor!(MemberUser, &[Role::Member]);
role_extractor!(TrainerUser, &[Role::Trainer]);
role_extractor!(AdminUser, &[Role::Admin]);
role_extractor!(StaffUser, &[Role::Trainer, Role::Admin]);
