pub mod postgres_member_repo;
pub mod postgres_trainer_repo;
pub mod postgres_session_repo;
pub mod postgres_equipment_repo;
pub mod postgres_plan_repo;
pub mod postgres_payment_repo;
pub mod postgres_attendance_repo;
pub mod postgres_verification_repo;
pub mod sqlite_member_repo;
pub mod sqlite_trainer_repo;
pub mod sqlite_session_repo;
pub mod sqlite_equipment_repo;
pub mod sqlite_plan_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_attendance_repo;
pub mod sqlite_verification_repo;
