use std::sync::Arc;
use crate::domain::ports::{
    MemberRepository, TrainerRepository, SessionRepository, EquipmentRepository,
    PlanRepository, PaymentRepository, AttendanceRepository, VerificationRepository,
    EmailService,
};
use crate::domain::services::token_service::TokenService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub member_repo: Arc<dyn MemberRepository>,
    pub trainer_repo: Arc<dyn TrainerRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub equipment_repo: Arc<dyn EquipmentRepository>,
    pub plan_repo: Arc<dyn PlanRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub verification_repo: Arc<dyn VerificationRepository>,
    pub token_service: Arc<TokenService>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
