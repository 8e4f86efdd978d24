//! Signed tokens that authenticate a user's devices to the service.
//!
//! Tokens are HS256 JWTs signed with the instance secret key. They are minted
//! locally and synchronously; nothing is cached.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::Token;
use crate::validate;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mint a token for `user_id`, valid for 24 hours.
///
/// Fails with an `ArgumentError` if `user_id` is empty or too long.
pub fn issue_token(config: &ClientConfig, user_id: &str) -> Result<Token, ApiError> {
    validate::user_id(user_id, false)?;

    let now = Utc::now();
    let claims = Claims {
        iss: config.token_issuer(),
        sub: user_id.to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key().as_bytes()),
    )?;
    Ok(Token { token })
}
