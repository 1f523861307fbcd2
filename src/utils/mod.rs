use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// Signed session payload held by an authenticated staff client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub staff_id: i64,
    pub exp: i64, // 过期时间
    pub iat: i64, // 签发时间
}

/// Messages queued for the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashClaims {
    pub messages: Vec<String>,
    pub exp: i64,
}

// 闪现消息只需撑过一次重定向
pub const FLASH_LIFETIME_SECS: i64 = 300;

/// Session lifetime as a signed duration; fails when the configured value
/// cannot be represented.
pub fn session_lifetime(config: &Config) -> Result<Duration, AppError> {
    i64::try_from(config.session_expiration_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or(AppError::SessionLifetime(config.session_expiration_secs))
}

pub fn generate_session_token(staff_id: i64, config: &Config) -> Result<(String, i64), AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(session_lifetime(config)?)
        .ok_or(AppError::SessionLifetime(config.session_expiration_secs))?
        .timestamp();

    let claims = SessionClaims {
        staff_id,
        exp: expiration,
        iat: now.timestamp(),
    };

    let token = sign(&claims, config)?;
    tracing::debug!("Issued session token for staff {}", staff_id);
    Ok((token, expiration))
}

pub fn verify_session_token(
    token: &str,
    config: &Config,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub fn generate_flash_token(
    messages: Vec<String>,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = FlashClaims {
        messages,
        exp: Utc::now().timestamp() + FLASH_LIFETIME_SECS,
    };
    sign(&claims, config)
}

pub fn verify_flash_token(
    token: &str,
    config: &Config,
) -> Result<Vec<String>, jsonwebtoken::errors::Error> {
    let token_data = decode::<FlashClaims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims.messages)
}

fn sign<T: Serialize>(claims: &T, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::{expired_session_token, test_config};
    use super::*;

    #[test]
    fn password_hash_is_salted_and_verifiable() {
        let first = hash_password("hunter2", 4).unwrap();
        let second = hash_password("hunter2", 4).unwrap();

        assert_ne!(first, "hunter2");
        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first).unwrap());
        assert!(!verify_password("hunter3", &first).unwrap());
    }

    #[test]
    fn session_token_round_trips_staff_id() {
        let config = test_config();
        let (token, exp) = generate_session_token(42, &config).unwrap();

        let claims = verify_session_token(&token, &config).unwrap();
        assert_eq!(claims.staff_id, 42);
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn session_token_expires_after_configured_lifetime() {
        let config = test_config();
        let before = Utc::now().timestamp();
        let (_, exp) = generate_session_token(1, &config).unwrap();

        assert!(exp >= before + 3600);
        assert!(exp <= Utc::now().timestamp() + 3600);
    }

    #[test]
    fn unrepresentable_session_lifetime_is_an_error() {
        for secs in [u64::MAX, 3_000_000_000_000 * 3600, i64::MAX as u64] {
            let mut config = test_config();
            config.session_expiration_secs = secs;

            let err = generate_session_token(1, &config).unwrap_err();
            assert!(matches!(err, AppError::SessionLifetime(s) if s == secs));
        }
    }

    #[test]
    fn session_token_rejects_other_secret() {
        let config = test_config();
        let (token, _) = generate_session_token(1, &config).unwrap();

        let mut other = test_config();
        other.secret_key = "another-secret".into();
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn expired_session_token_is_rejected() {
        let config = test_config();
        let token = expired_session_token(1, &config);

        assert!(verify_session_token(&token, &config).is_err());
    }

    #[test]
    fn flash_token_keeps_message_order() {
        let config = test_config();
        let token =
            generate_flash_token(vec!["first".into(), "second".into()], &config).unwrap();

        assert_eq!(
            verify_flash_token(&token, &config).unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}
