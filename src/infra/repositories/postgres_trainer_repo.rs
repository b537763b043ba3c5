use crate::domain::{models::trainer::Trainer, ports::TrainerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresTrainerRepo {
    pool: PgPool,
}

impl PostgresTrainerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerRepository for PostgresTrainerRepo {
    async fn create(&self, trainer: &Trainer) -> Result<Trainer, AppError> {
        sqlx::query_as::<_, Trainer>(
            r#"INSERT INTO trainers (id, name, email, password_hash, age, speciality, availability, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#
        )
            .bind(&trainer.id)
            .bind(&trainer.name)
            .bind(&trainer.email)
            .bind(&trainer.password_hash)
            .bind(trainer.age)
            .bind(&trainer.speciality)
            .bind(&trainer.availability)
            .bind(trainer.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Trainer>, AppError> {
        sqlx::query_as::<_, Trainer>("SELECT * FROM trainers ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, trainer: &Trainer) -> Result<Trainer, AppError> {
        sqlx::query_as::<_, Trainer>(
            r#"UPDATE trainers SET name=$1, age=$2, speciality=$3, availability=$4
               WHERE id=$5
               RETURNING *"#
        )
            .bind(&trainer.name)
            .bind(trainer.age)
            .bind(&trainer.speciality)
            .bind(&trainer.availability)
            .bind(&trainer.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM trainers")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
