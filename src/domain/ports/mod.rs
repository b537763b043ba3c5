use crate::domain::models::{
    member::Member,
    trainer::Trainer,
    session::{Session, Registration, SessionWithTrainer, AvailableSession, SessionRegistrant, BookingDetail},
    equipment::{Equipment, EquipmentUsage, UsageWithEquipment, UsageWithMember, UsageStats},
    membership::{MembershipPlan, Payment, PaymentWithPlan, PaymentDetail, PlanActiveCount},
    attendance::{Attendance, AttendanceWithMember, MemberAttendanceCount, DailyAttendance},
    auth::VerificationCode,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: &Member) -> Result<Member, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError>;
    async fn list_all(&self) -> Result<Vec<Member>, AppError>;
    async fn update(&self, member: &Member) -> Result<Member, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn create(&self, trainer: &Trainer) -> Result<Trainer, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Trainer>, AppError>;
    async fn list_all(&self) -> Result<Vec<Trainer>, AppError>;
    async fn update(&self, trainer: &Trainer) -> Result<Trainer, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;
    async fn find_detail(&self, id: &str) -> Result<Option<SessionWithTrainer>, AppError>;
    async fn list_with_trainer(&self) -> Result<Vec<SessionWithTrainer>, AppError>;
    async fn list_by_trainer(&self, trainer_id: &str) -> Result<Vec<Session>, AppError>;
    async fn list_available(&self) -> Result<Vec<AvailableSession>, AppError>;
    async fn update(&self, session: &Session) -> Result<Session, AppError>;
    /// Deletes the session and all of its registrations in one transaction.
    async fn delete_with_registrations(&self, id: &str) -> Result<(), AppError>;
    /// Inserts a registration only while the session still has free capacity.
    /// The capacity check and the insert are atomic against concurrent
    /// bookings; a full session yields `Conflict`.
    async fn register_member(&self, registration: &Registration) -> Result<Registration, AppError>;
    async fn find_registration(&self, member_id: &str, session_id: &str) -> Result<Option<Registration>, AppError>;
    async fn set_feedback(&self, member_id: &str, session_id: &str, feedback: &str) -> Result<Registration, AppError>;
    async fn list_registrants(&self, session_id: &str) -> Result<Vec<SessionRegistrant>, AppError>;
    async fn list_member_bookings(&self, member_id: &str) -> Result<Vec<BookingDetail>, AppError>;
    async fn count_registrations(&self, session_id: &str) -> Result<i64, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>, AppError>;
    async fn list_all(&self) -> Result<Vec<Equipment>, AppError>;
    async fn update(&self, equipment: &Equipment) -> Result<Equipment, AppError>;
    async fn record_usage(&self, usage: &EquipmentUsage) -> Result<EquipmentUsage, AppError>;
    async fn list_usage_by_member(&self, member_id: &str) -> Result<Vec<UsageWithEquipment>, AppError>;
    async fn usage_stats(&self, equipment_id: &str) -> Result<UsageStats, AppError>;
    async fn list_recent_usages(&self, equipment_id: &str, limit: i64) -> Result<Vec<UsageWithMember>, AppError>;
    async fn list_usage_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<UsageWithMember>, AppError>;
}

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MembershipPlan>, AppError>;
    async fn list_all(&self) -> Result<Vec<MembershipPlan>, AppError>;
    async fn update(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn member_count(&self, plan_id: &str) -> Result<i64, AppError>;
    async fn active_member_counts(&self, now: DateTime<Utc>) -> Result<Vec<PlanActiveCount>, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<PaymentWithPlan>, AppError>;
    async fn list_all(&self) -> Result<Vec<PaymentDetail>, AppError>;
    async fn total_revenue(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError>;
    /// The member's open record (no check-out yet), if any.
    async fn find_open(&self, member_id: &str) -> Result<Option<Attendance>, AppError>;
    async fn find_open_for_day(&self, member_id: &str, day: NaiveDate) -> Result<Option<Attendance>, AppError>;
    async fn close(&self, id: &str, out_time: DateTime<Utc>) -> Result<Attendance, AppError>;
    async fn list_by_member(&self, member_id: &str, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<Attendance>, AppError>;
    async fn list_all(&self, day: Option<NaiveDate>) -> Result<Vec<AttendanceWithMember>, AppError>;
    async fn count_for_day(&self, day: NaiveDate) -> Result<i64, AppError>;
    async fn stats_by_member(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MemberAttendanceCount>, AppError>;
    async fn daily_counts(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyAttendance>, AppError>;
}

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    async fn upsert(&self, record: &VerificationCode) -> Result<(), AppError>;
    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, AppError>;
    async fn delete(&self, email: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
