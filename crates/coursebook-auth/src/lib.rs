//! # Coursebook Auth
//!
//! Bearer token handling for the Coursebook API.
//!
//! - [`claims`]: the JWT claim set and the resolved [`Identity`]
//! - [`jwt`]: [`TokenService`], which issues tokens, validates them against
//!   an identity and decodes their subject without verification
//!
//! Tokens carry only the username as subject plus issue and expiry
//! timestamps. They are never persisted; the caller re-resolves the subject
//! against the credential store on every request before calling
//! [`TokenService::validate`].
//!
//! # Example
//!
//! ```ignore
//! use coursebook_auth::{Identity, TokenService};
//! use coursebook_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let token = tokens.issue("alice")?;
//!
//! let subject = tokens.extract_subject(&token);
//! assert_eq!(subject.as_deref(), Some("alice"));
//!
//! let identity = Identity { id: 1, username: "alice".to_string() };
//! assert!(tokens.validate(&token, &identity));
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity};
pub use jwt::TokenService;
