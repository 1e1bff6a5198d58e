/**
 * Token Codec
 *
 * This module turns a claim set into an opaque bearer token and back.
 *
 * Two interchangeable codecs exist behind the single `TokenCodec` type:
 *
 * - `Signed` - HS256 JWT (jsonwebtoken) with issued-at and expiry
 * - `Unsigned` - URL-safe base64 of the same JSON payload, no integrity.
 *   It exists for environments where signing is unavailable and must not be
 *   used in production.
 *
 * The codec is chosen once from configuration; callers never branch on it.
 * Decoding attacker-controlled input never panics, it reports `TokenError`.
 */

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::auth::claims::ClaimSet;
use crate::shared::config::{AppConfig, TokenCodecKind};

const PLAIN_PREFIX: &str = "plain.";

/// Token decoding and encoding failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The string cannot be parsed into a token of the expected shape,
    /// or its signature does not match
    #[error("malformed token")]
    MalformedToken,

    /// The token carried an expiry that has passed
    #[error("token expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Wire payload: the claim set plus timing fields
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    #[serde(flatten)]
    claims: ClaimSet,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

impl TokenPayload {
    fn new(claims: &ClaimSet, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            claims: claims.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

/// HS256 JWT codec
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    fn encode_at(&self, claims: &ClaimSet, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let payload = TokenPayload::new(claims, issued_at, self.ttl);
        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        decode::<TokenPayload>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::MalformedToken,
            })
    }
}

/// Unsigned, reversible codec. Provides expiry but no integrity.
#[derive(Debug, Clone)]
pub struct PlainCodec {
    ttl: Duration,
}

impl PlainCodec {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    fn encode_at(&self, claims: &ClaimSet, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let payload = TokenPayload::new(claims, issued_at, self.ttl);
        let json = serde_json::to_vec(&payload).map_err(|e| TokenError::Encode(e.to_string()))?;
        Ok(format!("{}{}", PLAIN_PREFIX, URL_SAFE_NO_PAD.encode(json)))
    }

    fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let encoded = token
            .strip_prefix(PLAIN_PREFIX)
            .ok_or(TokenError::MalformedToken)?;
        let json = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::MalformedToken)?;
        let payload: TokenPayload =
            serde_json::from_slice(&json).map_err(|_| TokenError::MalformedToken)?;

        if is_expired(payload.exp, Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }
        Ok(payload.claims)
    }
}

/// Same boundary as jsonwebtoken with zero leeway: valid through the `exp` second
fn is_expired(exp: i64, now: i64) -> bool {
    exp < now
}

/// Token codec selected at process configuration time
pub enum TokenCodec {
    Signed(JwtCodec),
    Unsigned(PlainCodec),
}

impl TokenCodec {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.token_codec {
            TokenCodecKind::Signed => Self::signed(&config.jwt_secret, config.token_ttl()),
            TokenCodecKind::Unsigned => {
                tracing::warn!("Unsigned token codec selected. Tokens carry no integrity protection.");
                Self::unsigned(config.token_ttl())
            }
        }
    }

    pub fn signed(secret: &str, ttl: Duration) -> Self {
        Self::Signed(JwtCodec::new(secret, ttl))
    }

    pub fn unsigned(ttl: Duration) -> Self {
        Self::Unsigned(PlainCodec::new(ttl))
    }

    /// Encode `claims` into a token issued now
    pub fn encode(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        self.encode_at(claims, Utc::now())
    }

    /// Encode `claims` into a token issued at `issued_at`
    pub fn encode_at(&self, claims: &ClaimSet, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        match self {
            Self::Signed(codec) => codec.encode_at(claims, issued_at),
            Self::Unsigned(codec) => codec.encode_at(claims, issued_at),
        }
    }

    /// Decode a token back into exactly the claim set it was built from
    pub fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        match self {
            Self::Signed(codec) => codec.decode(token),
            Self::Unsigned(codec) => codec.decode(token),
        }
    }
}
