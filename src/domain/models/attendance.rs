use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendance {
    pub id: String,
    pub member_id: String,
    pub day: NaiveDate,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
}

impl Attendance {
    pub fn check_in(member_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            day: now.date_naive(),
            in_time: now,
            out_time: None,
        }
    }
}

/// Attendance row joined with member identity, for admin views.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct AttendanceWithMember {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub day: NaiveDate,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
}

/// Per-member visit count over a reporting window.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MemberAttendanceCount {
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub attendance_count: i64,
}

/// Visits per day over a reporting window.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct DailyAttendance {
    pub day: NaiveDate,
    pub count: i64,
}
