use crate::domain::models::auth::{Claims, Principal, Role};
use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Duration, Utc};

/// Stateless bearer tokens: HS256, 24 hour expiry, no refresh flow.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, id: &str, role: Role, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: id.to_string(),
            role: role.as_str().to_string(),
            email: email.to_string(),
            exp: (now + Duration::hours(24)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        let role = Role::parse(&data.claims.role).ok_or(AppError::Unauthorized)?;

        Ok(Principal {
            id: data.claims.sub,
            role,
            email: data.claims.email,
        })
    }
}
