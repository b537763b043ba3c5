use crate::domain::{
    models::equipment::{Equipment, EquipmentUsage, UsageWithEquipment, UsageWithMember, UsageStats},
    ports::EquipmentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteEquipmentRepo {
    pool: SqlitePool,
}

impl SqliteEquipmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepository for SqliteEquipmentRepo {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            "INSERT INTO equipment (id, name, category, quantity, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&equipment.id).bind(&equipment.name).bind(&equipment.category)
            .bind(equipment.quantity).bind(&equipment.status).bind(equipment.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY created_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, equipment: &Equipment) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET name=?, category=?, quantity=?, status=? WHERE id=? RETURNING *"
        )
            .bind(&equipment.name).bind(&equipment.category).bind(equipment.quantity)
            .bind(&equipment.status).bind(&equipment.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn record_usage(&self, usage: &EquipmentUsage) -> Result<EquipmentUsage, AppError> {
        sqlx::query_as::<_, EquipmentUsage>(
            "INSERT INTO equipment_usages (id, member_id, equipment_id, used_on, used_at, duration_min, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&usage.id).bind(&usage.member_id).bind(&usage.equipment_id)
            .bind(usage.used_on).bind(usage.used_at).bind(usage.duration_min).bind(usage.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_usage_by_member(&self, member_id: &str) -> Result<Vec<UsageWithEquipment>, AppError> {
        sqlx::query_as::<_, UsageWithEquipment>(
            "SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                    u.used_on, u.used_at, u.duration_min
             FROM equipment_usages u JOIN equipment e ON e.id = u.equipment_id
             WHERE u.member_id = ? ORDER BY u.used_at DESC"
        ).bind(member_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn usage_stats(&self, equipment_id: &str) -> Result<UsageStats, AppError> {
        sqlx::query_as::<_, UsageStats>(
            "SELECT COUNT(*) AS usage_count, COALESCE(SUM(duration_min), 0) AS total_duration_min
             FROM equipment_usages WHERE equipment_id = ?"
        ).bind(equipment_id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_recent_usages(&self, equipment_id: &str, limit: i64) -> Result<Vec<UsageWithMember>, AppError> {
        sqlx::query_as::<_, UsageWithMember>(
            "SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                    m.name AS member_name, m.email AS member_email, u.used_at, u.duration_min
             FROM equipment_usages u
             JOIN equipment e ON e.id = u.equipment_id
             JOIN members m ON m.id = u.member_id
             WHERE u.equipment_id = ? ORDER BY u.used_at DESC LIMIT ?"
        ).bind(equipment_id).bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_usage_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<UsageWithMember>, AppError> {
        sqlx::query_as::<_, UsageWithMember>(
            "SELECT u.id, u.equipment_id, e.name AS equipment_name, e.category,
                    m.name AS member_name, m.email AS member_email, u.used_at, u.duration_min
             FROM equipment_usages u
             JOIN equipment e ON e.id = u.equipment_id
             JOIN members m ON m.id = u.member_id
             WHERE u.used_at >= ? AND u.used_at <= ? ORDER BY u.used_at DESC"
        ).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
