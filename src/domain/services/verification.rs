use crate::domain::models::auth::VerificationCode;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub const CODE_TTL_MINUTES: i64 = 5;

/// Six-digit registration code with a five minute lifetime. Stored in the
/// database rather than process memory so that every instance sees it.
pub fn new_code(email: &str) -> VerificationCode {
    let code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();
    VerificationCode {
        email: email.to_string(),
        code,
        expires_at: Utc::now() + Duration::minutes(CODE_TTL_MINUTES),
    }
}

pub fn is_expired(record: &VerificationCode, now: DateTime<Utc>) -> bool {
    now > record.expires_at
}
