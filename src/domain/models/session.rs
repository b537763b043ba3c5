use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Session {
    pub id: String,
    pub trainer_id: String,
    pub name: String,
    pub schedule: DateTime<Utc>,
    pub capacity: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(trainer_id: String, name: String, schedule: DateTime<Utc>, capacity: i32, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trainer_id,
            name,
            schedule,
            capacity,
            description,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub member_id: String,
    pub session_id: String,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(member_id: String, session_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            session_id,
            feedback: None,
            created_at: Utc::now(),
        }
    }
}

/// Session row joined with the owning trainer's public identity.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct SessionWithTrainer {
    pub id: String,
    pub trainer_id: String,
    pub name: String,
    pub schedule: DateTime<Utc>,
    pub capacity: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub trainer_name: String,
    pub trainer_speciality: String,
}

/// Session with open capacity, as served to the public listing.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct AvailableSession {
    pub id: String,
    pub name: String,
    pub schedule: DateTime<Utc>,
    pub capacity: i32,
    pub description: String,
    pub available_spots: i64,
    pub trainer_id: String,
    pub trainer_name: String,
    pub trainer_speciality: String,
}

/// One registrant of a session, as shown to the owning trainer.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct SessionRegistrant {
    pub registration_id: String,
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A member's booking joined with session and trainer detail.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct BookingDetail {
    pub registration_id: String,
    pub session_id: String,
    pub session_name: String,
    pub schedule: DateTime<Utc>,
    pub capacity: i32,
    pub description: String,
    pub feedback: Option<String>,
    pub booked_at: DateTime<Utc>,
    pub trainer_id: String,
    pub trainer_name: String,
    pub trainer_speciality: String,
}
