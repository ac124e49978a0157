//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the secret from [`JwtConfig`]. The
//! service exposes three operations:
//!
//! - [`TokenService::issue`]: sign a token for a username
//! - [`TokenService::extract_subject`]: decode the subject without any
//!   verification, used to look the identity up
//! - [`TokenService::validate`]: verify signature and expiry and check the
//!   subject against a resolved [`Identity`]
//!
//! Neither `extract_subject` nor `validate` ever fails loudly: malformed,
//! forged and expired tokens all come back as `None` / `false`.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use coursebook_config::JwtConfig;
use coursebook_core::AppError;

use crate::claims::{Claims, Identity};

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: i64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            expiry_seconds: jwt_config.access_token_expiry,
        }
    }

    /// Issues a signed token whose subject is `username`.
    ///
    /// The caller is expected to have checked the credentials already.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let exp = now.saturating_add(self.expiry_seconds).max(0) as usize;

        let claims = Claims {
            sub: username.to_string(),
            exp,
            iat: now as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
    }

    /// Decodes the subject of `token` without checking its signature or
    /// expiry.
    ///
    /// The result must not be trusted on its own; it only tells the caller
    /// which identity to resolve before calling [`TokenService::validate`].
    pub fn extract_subject(&self, token: &str) -> Option<String> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .ok()
    }

    /// Returns `true` only when `token` carries a valid signature, has not
    /// expired, and names `identity` as its subject.
    pub fn validate(&self, token: &str, identity: &Identity) -> bool {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => data.claims.sub == identity.username,
            Err(e) => {
                debug!(error = %e, "Token rejected");
                false
            }
        }
    }
}
