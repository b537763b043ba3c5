use crate::domain::{
    models::session::{Session, Registration, SessionWithTrainer, AvailableSession, SessionRegistrant, BookingDetail},
    ports::SessionRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepo {
    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(
            r#"INSERT INTO sessions (id, trainer_id, name, schedule, capacity, description, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#
        )
            .bind(&session.id)
            .bind(&session.trainer_id)
            .bind(&session.name)
            .bind(session.schedule)
            .bind(session.capacity)
            .bind(&session.description)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_detail(&self, id: &str) -> Result<Option<SessionWithTrainer>, AppError> {
        sqlx::query_as::<_, SessionWithTrainer>(
            r#"SELECT s.*, t.name AS trainer_name, t.speciality AS trainer_speciality
               FROM sessions s JOIN trainers t ON t.id = s.trainer_id
               WHERE s.id = $1"#
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_with_trainer(&self) -> Result<Vec<SessionWithTrainer>, AppError> {
        sqlx::query_as::<_, SessionWithTrainer>(
            r#"SELECT s.*, t.name AS trainer_name, t.speciality AS trainer_speciality
               FROM sessions s JOIN trainers t ON t.id = s.trainer_id
               ORDER BY s.schedule ASC"#
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_trainer(&self, trainer_id: &str) -> Result<Vec<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE trainer_id = $1 ORDER BY schedule ASC"
        )
            .bind(trainer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_available(&self) -> Result<Vec<AvailableSession>, AppError> {
        sqlx::query_as::<_, AvailableSession>(
            r#"SELECT s.id, s.name, s.schedule, s.capacity, s.description,
                      s.capacity - COUNT(r.id) AS available_spots,
                      t.id AS trainer_id, t.name AS trainer_name, t.speciality AS trainer_speciality
               FROM sessions s
               JOIN trainers t ON t.id = s.trainer_id
               LEFT JOIN registrations r ON r.session_id = s.id
               GROUP BY s.id, t.id
               HAVING s.capacity - COUNT(r.id) > 0
               ORDER BY s.schedule ASC"#
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, session: &Session) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(
            r#"UPDATE sessions SET name=$1, schedule=$2, capacity=$3, description=$4
               WHERE id=$5
               RETURNING *"#
        )
            .bind(&session.name)
            .bind(session.schedule)
            .bind(session.capacity)
            .bind(&session.description)
            .bind(&session.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_with_registrations(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM registrations WHERE session_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)
    }

    async fn register_member(&self, registration: &Registration) -> Result<Registration, AppError> {
        // Lock the session row so concurrent bookings for the last slot
        // serialize; the recount then sees every committed registration.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let capacity: Option<i32> = sqlx::query_scalar(
            "SELECT capacity FROM sessions WHERE id = $1 FOR UPDATE"
        )
            .bind(&registration.session_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let capacity = capacity.ok_or(AppError::NotFound("Session not found".into()))?;

        let booked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM registrations WHERE session_id = $1"
        )
            .bind(&registration.session_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if booked >= capacity as i64 {
            return Err(AppError::Conflict("Session is already full".to_string()));
        }

        let created = sqlx::query_as::<_, Registration>(
            r#"INSERT INTO registrations (id, member_id, session_id, feedback, created_at)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#
        )
            .bind(&registration.id)
            .bind(&registration.member_id)
            .bind(&registration.session_id)
            .bind(&registration.feedback)
            .bind(registration.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_registration(&self, member_id: &str, session_id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE member_id = $1 AND session_id = $2"
        )
            .bind(member_id)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_feedback(&self, member_id: &str, session_id: &str, feedback: &str) -> Result<Registration, AppError> {
        sqlx::query_as::<_, Registration>(
            r#"UPDATE registrations SET feedback = $1
               WHERE member_id = $2 AND session_id = $3
               RETURNING *"#
        )
            .bind(feedback)
            .bind(member_id)
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_registrants(&self, session_id: &str) -> Result<Vec<SessionRegistrant>, AppError> {
        sqlx::query_as::<_, SessionRegistrant>(
            r#"SELECT r.id AS registration_id, m.id AS member_id, m.name AS member_name,
                      m.email AS member_email, r.feedback, r.created_at
               FROM registrations r JOIN members m ON m.id = r.member_id
               WHERE r.session_id = $1 ORDER BY r.created_at ASC"#
        )
            .bind(session_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_member_bookings(&self, member_id: &str) -> Result<Vec<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(
            r#"SELECT r.id AS registration_id, s.id AS session_id, s.name AS session_name,
                      s.schedule, s.capacity, s.description, r.feedback, r.created_at AS booked_at,
                      t.id AS trainer_id, t.name AS trainer_name, t.speciality AS trainer_speciality
               FROM registrations r
               JOIN sessions s ON s.id = r.session_id
               JOIN trainers t ON t.id = s.trainer_id
               WHERE r.member_id = $1 ORDER BY s.schedule ASC"#
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_registrations(&self, session_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
