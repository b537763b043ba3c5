use crate::domain::{
    models::membership::{MembershipPlan, PlanActiveCount},
    ports::PlanRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, Utc};

pub struct PostgresPlanRepo {
    pool: PgPool,
}

impl PostgresPlanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepo {
    async fn create(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            r#"INSERT INTO membership_plans (id, plan_name, duration_months, cost, features, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#
        )
            .bind(&plan.id)
            .bind(&plan.plan_name)
            .bind(plan.duration_months)
            .bind(plan.cost)
            .bind(&plan.features)
            .bind(plan.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans ORDER BY cost ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            r#"UPDATE membership_plans SET plan_name=$1, duration_months=$2, cost=$3, features=$4
               WHERE id=$5
               RETURNING *"#
        )
            .bind(&plan.plan_name)
            .bind(plan.duration_months)
            .bind(plan.cost)
            .bind(&plan.features)
            .bind(&plan.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM membership_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Membership plan not found".into()));
        }
        Ok(())
    }

    async fn member_count(&self, plan_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM members WHERE membership_id = $1")
            .bind(plan_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn active_member_counts(&self, now: DateTime<Utc>) -> Result<Vec<PlanActiveCount>, AppError> {
        sqlx::query_as::<_, PlanActiveCount>(
            r#"SELECT p.id AS plan_id, p.plan_name, COUNT(m.id) AS active_count
               FROM membership_plans p
               LEFT JOIN members m ON m.membership_id = p.id AND m.plan_end >= $1
               GROUP BY p.id, p.plan_name
               ORDER BY p.cost ASC"#
        )
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
