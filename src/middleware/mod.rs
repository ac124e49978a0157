//! Middleware and extractors for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] decodes the token subject and resolves it in the store
//! 3. The token is verified against the resolved identity
//! 4. Handler executes with the identity, or the request is rejected with 403
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn list(AuthUser(identity): AuthUser) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod auth;
