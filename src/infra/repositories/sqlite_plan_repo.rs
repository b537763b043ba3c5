use crate::domain::{
    models::membership::{MembershipPlan, PlanActiveCount},
    ports::PlanRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};
use chrono::{DateTime, Utc};

pub struct SqlitePlanRepo {
    pool: SqlitePool,
}

impl SqlitePlanRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for SqlitePlanRepo {
    async fn create(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            "INSERT INTO membership_plans (id, plan_name, duration_months, cost, features, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&plan.id).bind(&plan.plan_name).bind(plan.duration_months)
            .bind(plan.cost).bind(&plan.features).bind(plan.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans ORDER BY cost ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            "UPDATE membership_plans SET plan_name=?, duration_months=?, cost=?, features=? WHERE id=? RETURNING *"
        )
            .bind(&plan.plan_name).bind(plan.duration_months).bind(plan.cost)
            .bind(&plan.features).bind(&plan.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM membership_plans WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Membership plan not found".into())); }
        Ok(())
    }
    async fn member_count(&self, plan_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM members WHERE membership_id = ?").bind(plan_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
    async fn active_member_counts(&self, now: DateTime<Utc>) -> Result<Vec<PlanActiveCount>, AppError> {
        sqlx::query_as::<_, PlanActiveCount>(
            "SELECT p.id AS plan_id, p.plan_name, COUNT(m.id) AS active_count
             FROM membership_plans p
             LEFT JOIN members m ON m.membership_id = p.id AND m.plan_end >= ?
             GROUP BY p.id, p.plan_name
             ORDER BY p.cost ASC"
        ).bind(now).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
