//! Signed Session Tokens
//!
//! HS256 JWTs carrying `{sub, exp, iat}`. The service is transport-agnostic:
//! callers decide whether the token travels in a cookie or a header.
//!
//! The wire `sub` claim is written as a decimal string, but tokens minted by
//! other issuers may carry it as a JSON number. Decoding normalizes both into
//! [`Claims::subject`] exactly once; anything unparseable becomes `0`, which
//! is never a real identity.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Subject value meaning "no identity"
pub const NO_SUBJECT: u64 = 0;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, wrong key, wrong algorithm, or malformed token
    #[error("Token is invalid")]
    Invalid,

    /// `exp` is in the past
    #[error("Token has expired")]
    Expired,

    /// Signing failed (key or serialization failure)
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Verified token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Normalized subject; [`NO_SUBJECT`] when the claim was unusable
    pub subject: u64,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// A freshly signed token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct OutgoingClaims {
    sub: String,
    exp: i64,
    iat: i64,
}

#[derive(Deserialize)]
struct IncomingClaims {
    #[serde(default)]
    sub: Value,
    exp: i64,
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a service from a shared secret and a token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a hard wall-clock comparison
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for `subject`, expiring `ttl` from now
    pub fn issue(&self, subject: u64) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| TokenError::Signing(format!("invalid ttl: {e}")))?;
        let expires_at = now + ttl;

        let claims = OutgoingClaims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry, returning normalized claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<IncomingClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or(TokenError::Invalid)?;

        Ok(Claims {
            subject: extract_subject(&data.claims.sub),
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Normalize a raw `sub` claim into an unsigned id.
///
/// Accepts a non-negative integral JSON number or a decimal string.
/// Everything else maps to [`NO_SUBJECT`].
pub fn extract_subject(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .unwrap_or(NO_SUBJECT),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(NO_SUBJECT),
        _ => NO_SUBJECT,
    }
}
