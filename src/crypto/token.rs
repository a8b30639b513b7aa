use chrono::{Duration, Utc};
use eyre::{Result, WrapErr};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::auth::{Claims, UserRecord};

pub const TOKEN_TTL_DAYS: i64 = 7;

/// Signs stateless HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user: &UserRecord) -> Result<String> {
        let claims = Claims {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .wrap_err("Failed to sign session token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use uuid::Uuid;

    fn decode_with(secret: &[u8], token: &str) -> jsonwebtoken::errors::Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    fn user() -> UserRecord {
        UserRecord {
            id: Uuid::from_u128(7),
            name: "Ann".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "salt:digest".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(b"test-secret");
        let token = issuer.issue(&user()).unwrap();
        assert!(!token.is_empty());

        let claims = decode_with(b"test-secret", &token).unwrap();
        assert_eq!(Uuid::from_u128(7).to_string(), claims.user_id);
        assert_eq!("a@b.com", claims.email);
    }

    #[test]
    fn test_expires_in_seven_days() {
        let issuer = TokenIssuer::new(b"test-secret");
        let before = Utc::now();
        let claims = decode_with(b"test-secret", &issuer.issue(&user()).unwrap()).unwrap();
        let ttl = claims.exp - before.timestamp();
        let week = Duration::days(TOKEN_TTL_DAYS).num_seconds();
        assert!((week..=week + 5).contains(&ttl), "ttl was {}", ttl);
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let token = TokenIssuer::new(b"test-secret").issue(&user()).unwrap();
        assert!(decode_with(b"other-secret", &token).is_err());
        assert!(decode_with(b"test-secret", "invalid.token.here").is_err());
    }
}
