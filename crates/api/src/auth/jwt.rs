//! JWT bearer-token generation and validation.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. Validation
//! checks the signature, the configured issuer and audience, and expiry with
//! no leeway.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quill_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_or, require, ConfigError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's username.
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 key used to sign and verify tokens.
    pub key: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in days (default: 7).
    pub expiry_days: i64,
}

/// Default token lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load JWT configuration through `lookup`.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_KEY`         | **yes**  | --      |
    /// | `JWT_ISSUER`      | **yes**  | --      |
    /// | `JWT_AUDIENCE`    | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `7`     |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = require(lookup, "JWT_KEY")?;
        let issuer = require(lookup, "JWT_ISSUER")?;
        let audience = require(lookup, "JWT_AUDIENCE")?;
        let expiry_days: i64 = parse_or(lookup, "JWT_EXPIRY_DAYS", DEFAULT_EXPIRY_DAYS)?;

        if expiry_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_DAYS",
                value: expiry_days.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            key,
            issuer,
            audience,
            expiry_days,
        })
    }
}

/// Generate an HS256 token for the given user.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_days * 24 * 60 * 60;

    let claims = Claims {
        sub: user_id,
        name: username.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.key.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.key.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
