//! Token primitives for the auth flows.
//!
//! Two token kinds exist. Access tokens are short-lived HS256 JWTs checked
//! on every request without touching the database. Refresh tokens are opaque
//! random strings persisted only as SHA-256 digests, so a leaked sessions
//! table cannot be replayed against the API.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use campusnotes_core::types::DbId;

const DEFAULT_ACCESS_TTL_MINS: i64 = 15;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to.
    pub sub: DbId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Per-token UUID, kept for audit trails.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_mins: i64,
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty), `JWT_ACCESS_TTL_MINS`
    /// (default 15), and `JWT_REFRESH_TTL_DAYS` (default 7) from the
    /// environment. Panics when the secret is missing so a misconfigured
    /// deployment dies at startup instead of issuing unverifiable tokens.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_ttl_mins: env_i64("JWT_ACCESS_TTL_MINS", DEFAULT_ACCESS_TTL_MINS),
            refresh_ttl_days: env_i64("JWT_REFRESH_TTL_DAYS", DEFAULT_REFRESH_TTL_DAYS),
        }
    }
}

fn env_i64(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{var} must be an integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Issue a signed access token for `user_id`.
pub fn issue_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: iat + config.access_ttl_mins * 60,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify signature and expiry, returning the embedded claims.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

/// Mint a fresh refresh token, returning `(plaintext, digest)`. The
/// plaintext goes to the client; only the digest is stored.
pub fn mint_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = refresh_token_digest(&plaintext);
    (plaintext, digest)
}

/// Hex SHA-256 of a refresh token, the form stored in `sessions`.
pub fn refresh_token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
