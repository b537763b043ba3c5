use crate::domain::{models::auth::VerificationCode, ports::VerificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteVerificationRepo {
    pool: SqlitePool,
}

impl SqliteVerificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepository for SqliteVerificationRepo {
    async fn upsert(&self, record: &VerificationCode) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO verification_codes (email, code, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(email) DO UPDATE SET code = excluded.code, expires_at = excluded.expires_at"
        )
            .bind(&record.email).bind(&record.code).bind(record.expires_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, AppError> {
        sqlx::query_as::<_, VerificationCode>("SELECT * FROM verification_codes WHERE email = ?").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, email: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM verification_codes WHERE email = ?").bind(email).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
