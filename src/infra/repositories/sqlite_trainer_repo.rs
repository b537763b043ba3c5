use crate::domain::{models::trainer::Trainer, ports::TrainerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};

pub struct SqliteTrainerRepo {
    pool: SqlitePool,
}

impl SqliteTrainerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerRepository for SqliteTrainerRepo {
    async fn create(&self, trainer: &Trainer) -> Result<Trainer, AppError> {
        sqlx::query_as::<_, Trainer>(
            "INSERT INTO trainers (id, name, email, password_hash, age, speciality, availability, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&trainer.id).bind(&trainer.name).bind(&trainer.email).bind(&trainer.password_hash)
            .bind(trainer.age).bind(&trainer.speciality).bind(&trainer.availability).bind(trainer.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE email = ?").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers ORDER BY created_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, trainer: &Trainer) -> Result<Trainer, AppError> {
        sqlx::query_as::<_, Trainer>(
            "UPDATE trainers SET name=?, age=?, speciality=?, availability=? WHERE id=? RETURNING *"
        )
            .bind(&trainer.name).bind(trainer.age).bind(&trainer.speciality)
            .bind(&trainer.availability).bind(&trainer.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM trainers").fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
