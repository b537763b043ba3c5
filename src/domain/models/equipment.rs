use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Equipment {
    pub fn new(name: String, category: String, quantity: i32, status: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            category,
            quantity,
            status,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EquipmentUsage {
    pub id: String,
    pub member_id: String,
    pub equipment_id: String,
    pub used_on: NaiveDate,
    pub used_at: DateTime<Utc>,
    pub duration_min: i32,
    pub created_at: DateTime<Utc>,
}

impl EquipmentUsage {
    pub fn new(member_id: String, equipment_id: String, used_on: NaiveDate, used_at: DateTime<Utc>, duration_min: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            equipment_id,
            used_on,
            used_at,
            duration_min,
            created_at: Utc::now(),
        }
    }
}

/// Usage row joined with equipment identity, for a member's history view.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct UsageWithEquipment {
    pub id: String,
    pub equipment_id: String,
    pub equipment_name: String,
    pub category: String,
    pub used_on: NaiveDate,
    pub used_at: DateTime<Utc>,
    pub duration_min: i32,
}

/// Usage row joined with member identity, for admin reporting.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct UsageWithMember {
    pub id: String,
    pub equipment_id: String,
    pub equipment_name: String,
    pub category: String,
    pub member_name: String,
    pub member_email: String,
    pub used_at: DateTime<Utc>,
    pub duration_min: i32,
}

/// Aggregate usage counters for one piece of equipment.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct UsageStats {
    pub usage_count: i64,
    pub total_duration_min: i64,
}
