use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Weekly availability is a 7-character flags string, one char per weekday
/// starting Monday: '1' = available, '0' = not.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub speciality: String,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

impl Trainer {
    pub fn new(name: String, email: String, password_hash: String, age: i32, speciality: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            age,
            speciality,
            availability: "0000000".to_string(),
            created_at: Utc::now(),
        }
    }
}

pub fn is_valid_availability(flags: &str) -> bool {
    flags.len() == 7 && flags.chars().all(|c| c == '0' || c == '1')
}
