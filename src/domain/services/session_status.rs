use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a session lies ahead of or behind the clock. Derived from the
/// schedule at read time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Upcoming,
    Attended,
}

pub fn session_status(schedule: DateTime<Utc>, now: DateTime<Utc>) -> SessionStatus {
    if schedule > now {
        SessionStatus::Upcoming
    } else {
        SessionStatus::Attended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn future_schedule_is_upcoming() {
        let now = Utc::now();
        assert_eq!(session_status(now + Duration::hours(1), now), SessionStatus::Upcoming);
    }

    #[test]
    fn past_schedule_is_attended() {
        let now = Utc::now();
        assert_eq!(session_status(now - Duration::hours(1), now), SessionStatus::Attended);
        assert_eq!(session_status(now, now), SessionStatus::Attended);
    }
}
