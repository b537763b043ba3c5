use crate::domain::{
    models::membership::{Payment, PaymentWithPlan, PaymentDetail},
    ports::PaymentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, member_id, plan_id, amount, payment_mode, paid_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&payment.id).bind(&payment.member_id).bind(&payment.plan_id)
            .bind(payment.amount).bind(&payment.payment_mode).bind(payment.paid_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<PaymentWithPlan>, AppError> {
        sqlx::query_as::<_, PaymentWithPlan>(
            "SELECT p.id, p.plan_id, mp.plan_name, p.amount, p.payment_mode, p.paid_at
             FROM payments p JOIN membership_plans mp ON mp.id = p.plan_id
             WHERE p.member_id = ? ORDER BY p.paid_at DESC"
        ).bind(member_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<PaymentDetail>, AppError> {
        sqlx::query_as::<_, PaymentDetail>(
            "SELECT p.id, p.member_id, m.name AS member_name, m.email AS member_email,
                    mp.plan_name, p.amount, p.payment_mode, p.paid_at
             FROM payments p
             JOIN members m ON m.id = p.member_id
             JOIN membership_plans mp ON mp.id = p.plan_id
             ORDER BY p.paid_at DESC"
        ).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn total_revenue(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COALESCE(SUM(amount), 0) as total FROM payments").fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("total"))
    }
}
