use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tenure_core::UserId;

use crate::Role;

/// JWT claims model (transport-agnostic).
///
/// The minimal set of claims the backend expects once a token has been
/// decoded and its signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user account identifier.
    pub sub: UserId,

    /// Account email, carried for log context.
    pub email: String,

    /// The single role granted to the account.
    pub role: Role,

    /// Account enabled flag. Inactive accounts present valid tokens but are
    /// refused at the door.
    pub is_active: bool,

    /// Operator flag, equivalent in power to the superadmin role.
    #[serde(default)]
    pub is_superuser: bool,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token is malformed or its signature does not verify")]
    Malformed,
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification belongs to
/// [`JwtValidator`] implementations.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Token verification boundary.
///
/// The transport layer holds one of these behind a pointer; tests swap in
/// stubs without touching key material.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HMAC-SHA256 verification over a shared secret.
pub struct Hs256JwtValidator {
    decoding: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        // Claims carry RFC 3339 timestamps rather than numeric `exp`/`iat`,
        // so the library's registered-claim checks are switched off and the
        // time window is validated explicitly afterwards.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenValidationError::Malformed)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn claims_valid_at(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            email: "p.gray@example.com".to_string(),
            role: Role::Hr,
            is_active: true,
            is_superuser: false,
            issued_at: now - Duration::minutes(5),
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn fresh_claims_validate() {
        let now = Utc::now();
        assert!(validate_claims(&claims_valid_at(now), now).is_ok());
    }

    #[test]
    fn expired_claims_are_rejected() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.expires_at = now - Duration::seconds(1);
        claims.issued_at = now - Duration::hours(2);
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn future_issuance_is_rejected() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.issued_at = now + Duration::minutes(10);
        claims.expires_at = now + Duration::hours(2);
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.expires_at = claims.issued_at;
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn hs256_round_trip() {
        let now = Utc::now();
        let claims = claims_valid_at(now);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let validator = Hs256JwtValidator::new(b"test-secret");
        let decoded = validator.validate(&token, now).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let now = Utc::now();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims_valid_at(now),
            &EncodingKey::from_secret(b"one-secret"),
        )
        .unwrap();

        let validator = Hs256JwtValidator::new(b"another-secret");
        assert_eq!(
            validator.validate(&token, now),
            Err(TokenValidationError::Malformed)
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        let validator = Hs256JwtValidator::new(b"test-secret");
        assert_eq!(
            validator.validate("not.a.jwt", Utc::now()),
            Err(TokenValidationError::Malformed)
        );
    }
}
