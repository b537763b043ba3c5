use crate::domain::{models::auth::VerificationCode, ports::VerificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresVerificationRepo {
    pool: PgPool,
}

impl PostgresVerificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepository for PostgresVerificationRepo {
    async fn upsert(&self, record: &VerificationCode) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO verification_codes (email, code, expires_at) VALUES ($1, $2, $3)
               ON CONFLICT (email) DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at"#
        )
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, AppError> {
        sqlx::query_as::<_, VerificationCode>("SELECT * FROM verification_codes WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, email: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM verification_codes WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
