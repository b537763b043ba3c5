use crate::domain::{
    models::equipment::{Equipment, EquipmentUsage, UsageWithEquipment, UsageWithMember, UsageStats},
    ports::EquipmentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};

pub struct PostgresEquipmentRepo {
    pool: PgPool,
}

impl PostgresEquipmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepository for PostgresEquipmentRepo {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            r#"INSERT INTO equipment (id, name, category, quantity, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#
        )
            .bind(&equipment.id)
            .bind(&equipment.name)
            .bind(&equipment.category)
            .bind(equipment.quantity)
            .bind(&equipment.status)
            .bind(equipment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, equipment: &Equipment) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            r#"UPDATE equipment SET name=$1, category=$2, quantity=$3, status=$4
               WHERE id=$5
               RETURNING *"#
        )
            .bind(&equipment.name)
            .bind(&equipment.category)
            .bind(equipment.quantity)
            .bind(&equipment.status)
            .bind(&equipment.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn record_usage(&self, usage: &EquipmentUsage) -> Result<EquipmentUsage, AppError> {
        sqlx::query_as::<_, EquipmentUsage>(
            r#"INSERT INTO equipment_usages (id, member_id, equipment_id, used_on, used_at, duration_min, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#
        )
            .bind(&usage.id)
            .bind(&usage.member_id)
            .bind(&usage.equipment_id)
            .bind(usage.used_on)
            .bind(usage.used_at)
            .bind(usage.duration_min)
            .bind(usage.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_usage_by_member(&self, member_id: &str) -> Result<Vec<UsageWithEquipment>, AppError> {
        sqlx::query_as::<_, UsageWithEquipment>(
            r#"SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                      u.used_on, u.used_at, u.duration_min
               FROM equipment_usages u JOIN equipment e ON e.id = u.equipment_id
               WHERE u.member_id = $1 ORDER BY u.used_at DESC"#
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn usage_stats(&self, equipment_id: &str) -> Result<UsageStats, AppError> {
        sqlx::query_as::<_, UsageStats>(
            r#"SELECT COUNT(*) AS usage_count, COALESCE(SUM(duration_min), 0)::BIGINT AS total_duration_min
               FROM equipment_usages WHERE equipment_id = $1"#
        )
            .bind(equipment_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_recent_usages(&self, equipment_id: &str, limit: i64) -> Result<Vec<UsageWithMember>, AppError> {
        sqlx::query_as::<_, UsageWithMember>(
            r#"SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                      m.name AS member_name, m.email AS member_email, u.used_at, u.duration_min
               FROM equipment_usages u
               JOIN equipment e ON e.id = u.equipment_id
               JOIN members m ON m.id = u.member_id
               WHERE u.equipment_id = $1 ORDER BY u.used_at DESC LIMIT $2"#
        )
            .bind(equipment_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_usage_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<UsageWithMember>, AppError> {
        sqlx::query_as::<_, UsageWithMember>(
            r#"SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                      m.name AS member_name, m.email AS member_email, u.used_at, u.duration_min
               FROM equipment_usages u
               JOIN equipment e ON e.id = u.equipment_id
               JOIN members m ON m.id = u.member_id
               WHERE u.used_at >= $1 AND u.used_at <= $2 ORDER BY u.used_at DESC"#
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
