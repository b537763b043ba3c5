use crate::domain::{
    models::attendance::{Attendance, AttendanceWithMember, MemberAttendanceCount, DailyAttendance},
    ports::AttendanceRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, NaiveDate, Utc};

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepo {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            r#"INSERT INTO attendance (id, member_id, day, in_time, out_time)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#
        )
            .bind(&attendance.id)
            .bind(&attendance.member_id)
            .bind(attendance.day)
            .bind(attendance.in_time)
            .bind(attendance.out_time)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_open(&self, member_id: &str) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            r#"SELECT * FROM attendance WHERE member_id = $1 AND out_time IS NULL
               ORDER BY in_time DESC LIMIT 1"#
        )
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_open_for_day(&self, member_id: &str, day: NaiveDate) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE member_id = $1 AND day = $2 AND out_time IS NULL LIMIT 1"
        )
            .bind(member_id)
            .bind(day)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn close(&self, id: &str, out_time: DateTime<Utc>) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            "UPDATE attendance SET out_time = $1 WHERE id = $2 RETURNING *"
        )
            .bind(out_time)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_member(&self, member_id: &str, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<Attendance>, AppError> {
        match range {
            Some((start, end)) => {
                sqlx::query_as::<_, Attendance>(
                    r#"SELECT * FROM attendance
                       WHERE member_id = $1 AND day >= $2 AND day <= $3
                       ORDER BY day DESC"#
                )
                    .bind(member_id)
                    .bind(start)
                    .bind(end)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            None => {
                sqlx::query_as::<_, Attendance>(
                    "SELECT * FROM attendance WHERE member_id = $1 ORDER BY day DESC"
                )
                    .bind(member_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
        }
    }

    async fn list_all(&self, day: Option<NaiveDate>) -> Result<Vec<AttendanceWithMember>, AppError> {
        match day {
            Some(day) => {
                sqlx::query_as::<_, AttendanceWithMember>(
                    r#"SELECT a.id, a.member_id, m.name AS member_name, m.email AS member_email,
                              a.day, a.in_time, a.out_time
                       FROM attendance a JOIN members m ON m.id = a.member_id
                       WHERE a.day = $1 ORDER BY a.in_time DESC"#
                )
                    .bind(day)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
            None => {
                sqlx::query_as::<_, AttendanceWithMember>(
                    r#"SELECT a.id, a.member_id, m.name AS member_name, m.email AS member_email,
                              a.day, a.in_time, a.out_time
                       FROM attendance a JOIN members m ON m.id = a.member_id
                       ORDER BY a.in_time DESC"#
                )
                    .fetch_all(&self.pool)
                    .await
                    .map_err(AppError::Database)
            }
        }
    }

    async fn count_for_day(&self, day: NaiveDate) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM attendance WHERE day = $1")
            .bind(day)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn stats_by_member(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MemberAttendanceCount>, AppError> {
        sqlx::query_as::<_, MemberAttendanceCount>(
            r#"SELECT a.member_id, m.name AS member_name, m.email AS member_email,
                      COUNT(a.id) AS attendance_count
               FROM attendance a JOIN members m ON m.id = a.member_id
               WHERE a.day >= $1 AND a.day <= $2
               GROUP BY a.member_id, m.name, m.email
               ORDER BY attendance_count DESC"#
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn daily_counts(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyAttendance>, AppError> {
        sqlx::query_as::<_, DailyAttendance>(
            r#"SELECT day, COUNT(*) AS count FROM attendance
               WHERE day >= $1 AND day <= $2
               GROUP BY day ORDER BY day ASC"#
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
