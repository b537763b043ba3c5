use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, admin, attendance, equipment, member, membership, payment, session, trainer};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Members
        .route("/api/members/register", post(member::register))
        .route("/api/members/login", post(member::login))
        .route("/api/members/profile", get(member::get_profile))
        .route("/api/members/bookings", get(member::get_bookings))
        .route("/api/members/verification/request", post(member::request_verification))
        .route("/api/members/verification/confirm", post(member::confirm_verification))

        // Trainers
        .route("/api/trainers/register", post(trainer::register))
        .route("/api/trainers/login", post(trainer::login))
        .route("/api/trainers/availability", put(trainer::update_availability))
        .route("/api/trainers/sessions", get(trainer::get_sessions))
        .route("/api/trainers/edit-profile", put(trainer::update_profile))
        .route("/api/trainers/profile", get(trainer::get_profile))
        .route("/api/trainers/profile/{trainer_id}", get(trainer::get_public_profile))

        // Sessions & bookings
        .route("/api/sessions", post(session::create_session).get(session::list_sessions))
        .route("/api/sessions/available", get(session::available_sessions))
        .route("/api/sessions/my-sessions", get(session::my_sessions))
        .route("/api/sessions/update/{session_id}", put(session::update_session))
        .route("/api/sessions/delete/{session_id}", delete(session::delete_session))
        .route("/api/sessions/{session_id}", get(session::get_session))
        .route("/api/sessions/{session_id}/book", post(session::book_session))
        .route("/api/sessions/{session_id}/feedback", post(session::add_feedback).get(session::get_feedback))
        .route("/api/sessions/{session_id}/members", get(session::get_registrants))

        // Equipment
        .route("/api/equipment", post(equipment::add_equipment))
        .route("/api/equipment/getAll", get(equipment::list_equipment))
        .route("/api/equipment/stats/overview", get(equipment::stats_overview))
        .route("/api/equipment/stats/usage-by-date", get(equipment::usage_by_date_range))
        .route("/api/equipment/stats/{id}", get(equipment::equipment_stats))
        .route("/api/equipment/usage", post(equipment::record_usage))
        .route("/api/equipment/usage/history", get(equipment::usage_history))
        .route("/api/equipment/{id}", put(equipment::update_equipment))

        // Admin
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/members", get(admin::list_members))
        .route("/api/admin/trainers", get(admin::list_trainers))
        .route("/api/admin/dashboard-stats", get(admin::dashboard_stats))

        // Membership plans
        .route("/api/memberships/plans", post(membership::create_plan).get(membership::list_plans))
        .route("/api/memberships/plans/all", get(membership::list_plans_admin))
        .route("/api/memberships/plans/{plan_id}", put(membership::update_plan).delete(membership::delete_plan))
        .route("/api/memberships/purchase/{plan_id}", post(membership::purchase_plan))
        .route("/api/memberships/my-membership", get(membership::membership_status))
        .route("/api/memberships/purchase-history", get(membership::purchase_history))

        // Payments
        .route("/api/payments/history", get(payment::payment_history))
        .route("/api/payments/all", get(payment::all_payments))
        .route("/api/payments/revenue-and-active-memberships", get(payment::revenue_and_active_memberships))

        // Attendance
        .route("/api/attendance/check-in", post(attendance::check_in))
        .route("/api/attendance/check-out", post(attendance::check_out))
        .route("/api/attendance/history", get(attendance::member_history))
        .route("/api/attendance/all", get(attendance::all_attendance))
        .route("/api/attendance/stats", get(attendance::attendance_stats))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
