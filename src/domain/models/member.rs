use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub membership_id: Option<String>,
    pub plan_start: Option<DateTime<Utc>>,
    pub plan_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: String, email: String, password_hash: String, age: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            age,
            membership_id: None,
            plan_start: None,
            plan_end: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_active_membership(&self, now: DateTime<Utc>) -> bool {
        match (&self.membership_id, self.plan_end) {
            (Some(_), Some(end)) => end >= now,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn membership_inactive_without_plan() {
        let m = Member::new("A".into(), "a@a.com".into(), "h".into(), 30);
        assert!(!m.has_active_membership(Utc::now()));
    }

    #[test]
    fn membership_active_until_end_date() {
        let mut m = Member::new("A".into(), "a@a.com".into(), "h".into(), 30);
        m.membership_id = Some("plan-1".into());
        m.plan_end = Some(Utc::now() + Duration::days(10));
        assert!(m.has_active_membership(Utc::now()));

        m.plan_end = Some(Utc::now() - Duration::days(1));
        assert!(!m.has_active_membership(Utc::now()));
    }
}
