//! Simulated session token.
//!
//! The token mimics the shape of a JWT: `header.payload.signature`, where the
//! payload is base64url-encoded JSON claims. Nothing signs or verifies it.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Validity window of an issued token.
pub const TOKEN_TTL_SECS: i64 = 86_400;

const TOKEN_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token must have three dot-separated parts, found {0}")]
    Malformed(usize),

    #[error("token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token claims are not valid json: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims embedded in the token payload. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn issue(email: impl Into<String>, issued_at_secs: i64) -> Self {
        Self {
            email: email.into(),
            iat: issued_at_secs,
            exp: issued_at_secs + TOKEN_TTL_SECS,
        }
    }

    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}

/// Opaque simulated credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Synthesize a token for `claims` with a random stand-in signature.
    pub fn issue(claims: &TokenClaims) -> Result<Self, TokenError> {
        let header = URL_SAFE_NO_PAD.encode(TOKEN_HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signature = uuid::Uuid::new_v4().simple().to_string();
        Ok(Self(format!("{header}.{payload}.{signature}")))
    }

    pub fn from_string(token: String) -> Self {
        Self(token)
    }

    /// Decode the payload claims. No signature check happens.
    pub fn claims(&self) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = self.0.split('.').collect();
        let [_, payload, _] = parts.as_slice() else {
            return Err(TokenError::Malformed(parts.len()));
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_claims_expire_one_day_later() {
        let claims = TokenClaims::issue("a@b.com", 1_700_000_000);

        assert_eq!(claims.exp - claims.iat, 86_400);
        assert!(!claims.is_expired_at(1_700_000_000 + 86_399));
        assert!(claims.is_expired_at(1_700_000_000 + 86_400));
    }

    #[test]
    fn token_has_three_parts_and_decodes_back_to_claims() {
        let claims = TokenClaims::issue("a@b.com", 1_700_000_000);
        let token = SessionToken::issue(&claims).unwrap();

        assert_eq!(token.as_str().split('.').count(), 3);
        assert_eq!(token.claims().unwrap(), claims);
    }

    #[test]
    fn header_is_a_jwt_style_none_header() {
        let token = SessionToken::issue(&TokenClaims::issue("a@b.com", 0)).unwrap();
        let header = token.as_str().split('.').next().unwrap();

        let decoded = URL_SAFE_NO_PAD.decode(header).unwrap();
        assert_eq!(decoded, TOKEN_HEADER.as_bytes());
    }

    #[test]
    fn two_part_token_is_malformed() {
        let token = SessionToken::from_string("abc.def".to_string());

        assert!(matches!(token.claims(), Err(TokenError::Malformed(2))));
    }

    #[test]
    fn garbage_payload_is_rejected() {
        let token = SessionToken::from_string("a.!!!.c".to_string());

        assert!(matches!(token.claims(), Err(TokenError::Encoding(_))));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let token = SessionToken::from_string("secret.value.here".to_string());

        assert!(!format!("{token:?}").contains("secret"));
    }
}
