//! Bearer token issuance and verification.
//!
//! Tokens are `<payload>.<signature>`, both base64url without padding. The
//! payload is the JSON-encoded [`TokenClaims`]; the signature is
//! HMAC-SHA256 over the encoded payload.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use bazaar_core::Identity;

type HmacSha256 = Hmac<Sha256>;

/// Minimum symmetric key length in bytes.
pub const MIN_KEY_LENGTH: usize = 32;

/// Errors from creating or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("symmetric key must be at least {MIN_KEY_LENGTH} bytes")]
    InvalidKey,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token duration is out of range")]
    InvalidDuration,
    #[error("token payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// What a verified token says about its bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: Uuid,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies bearer tokens.
pub trait TokenMaker: Send + Sync {
    /// Issue a token for `identity`, valid for `duration`.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] if the claims cannot be encoded.
    fn create_token(
        &self,
        identity: Identity,
        duration: TimeDelta,
    ) -> Result<(String, TokenClaims), TokenError>;

    /// Check a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] describing why the token was rejected.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

/// HMAC-SHA256 token maker.
pub struct HmacTokenMaker {
    key: SecretString,
}

impl std::fmt::Debug for HmacTokenMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenMaker")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl HmacTokenMaker {
    /// Create a token maker from a symmetric key.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidKey` if the key is shorter than [`MIN_KEY_LENGTH`].
    pub fn new(key: SecretString) -> Result<Self, TokenError> {
        if key.expose_secret().len() < MIN_KEY_LENGTH {
            return Err(TokenError::InvalidKey);
        }
        Ok(Self { key })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)
    }
}

impl TokenMaker for HmacTokenMaker {
    fn create_token(
        &self,
        identity: Identity,
        duration: TimeDelta,
    ) -> Result<(String, TokenClaims), TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(duration)
            .ok_or(TokenError::InvalidDuration)?;

        let claims = TokenClaims {
            id: Uuid::new_v4(),
            identity,
            issued_at,
            expires_at,
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok((format!("{payload}.{signature}"), claims))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims = serde_json::from_slice(&payload)?;

        if claims.expires_at <= Utc::now() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{UserId, UserIdentity};

    use super::*;

    fn maker() -> HmacTokenMaker {
        HmacTokenMaker::new(SecretString::from("k".repeat(32))).unwrap()
    }

    fn user_identity() -> Identity {
        Identity::User(UserIdentity {
            user_id: UserId::new(9),
        })
    }

    #[test]
    fn test_rejects_short_key() {
        assert!(matches!(
            HmacTokenMaker::new(SecretString::from("short")),
            Err(TokenError::InvalidKey)
        ));
    }

    #[test]
    fn test_issued_token_verifies() {
        let maker = maker();
        let (token, claims) = maker
            .create_token(user_identity(), TimeDelta::minutes(5))
            .unwrap();

        let verified = maker.verify_token(&token).unwrap();
        assert_eq!(verified, claims);
        assert_eq!(verified.identity, user_identity());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let maker = maker();
        let (token, _) = maker
            .create_token(user_identity(), TimeDelta::minutes(-1))
            .unwrap();

        assert!(matches!(maker.verify_token(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let maker = maker();
        let (token, _) = maker
            .create_token(user_identity(), TimeDelta::minutes(5))
            .unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = TokenClaims {
            id: Uuid::new_v4(),
            identity: Identity::User(UserIdentity {
                user_id: UserId::new(1),
            }),
            issued_at: Utc::now(),
            expires_at: Utc::now() + TimeDelta::hours(1),
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());

        assert!(matches!(
            maker.verify_token(&format!("{forged_payload}.{signature}")),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = HmacTokenMaker::new(SecretString::from("z".repeat(40))).unwrap();
        let (token, _) = other
            .create_token(user_identity(), TimeDelta::minutes(5))
            .unwrap();

        assert!(matches!(
            maker().verify_token(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_token() {
        assert!(matches!(
            maker().verify_token("no-dot-here"),
            Err(TokenError::Malformed)
        ));
    }
}
