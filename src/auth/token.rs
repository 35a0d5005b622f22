//! Cookie and JWT payload helpers.
//!
//! TRADE-OFFS
//! ==========
//! Payloads are decoded without signature verification. The results only
//! estimate expiry for readable cookies; access decisions always come from
//! the server via `/v1/auth/me`.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::router::permissions::PermissionId;

/// Seconds before `exp` at which a token is already treated as expired.
pub const EXPIRY_BUFFER_SECS: u64 = 30;

const JWT_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token does not have three segments")]
    Malformed,

    #[error("token payload is not base64url: {0}")]
    Encoding(String),

    #[error("token payload is not valid JSON: {0}")]
    Payload(String),
}

/// Decoded access-token claims.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenPayload {
    pub user_id: i64,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
    pub iat: u64,
    pub exp: u64,
}

/// Decoded refresh-token claims.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenPayload {
    pub user_id: i64,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Deserialize)]
struct ExpiryOnly {
    exp: Option<u64>,
}

/// Value of cookie `name` in a `Cookie` header (`a=1; b=2`).
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Decode the payload segment of a JWT.
///
/// # Errors
///
/// Returns [`TokenError`] when the token is not three segments, or the payload
/// is not base64url-encoded JSON of shape `T`.
pub fn decode_jwt<T: DeserializeOwned>(token: &str) -> Result<T, TokenError> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(TokenError::Malformed);
    };
    let bytes = JWT_PAYLOAD
        .decode(payload)
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))
}

/// Whether `token` expires within [`EXPIRY_BUFFER_SECS`] of `now_secs`.
/// Undecodable tokens and tokens without `exp` count as expired.
#[must_use]
pub fn is_token_expired(token: &str, now_secs: u64) -> bool {
    match decode_jwt::<ExpiryOnly>(token) {
        Ok(ExpiryOnly { exp: Some(exp) }) => exp < now_secs.saturating_add(EXPIRY_BUFFER_SECS),
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(error = %err, "undecodable token treated as expired");
            true
        }
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
