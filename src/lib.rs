//! # Coursebook API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for registering students,
//! issuing bearer tokens, and managing courses and enrollments.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── coursebook-core/     # AppError, password hashing
//! ├── coursebook-config/   # Env-driven configuration
//! ├── coursebook-auth/     # JWT claims and TokenService
//! ├── coursebook-models/   # Domain models and DTOs
//! ├── coursebook-db/       # Store traits, PostgreSQL and in-memory stores
//! └── coursebook-cli/      # Administrative CLI
//! src/
//! ├── middleware/          # AuthGate and the AuthUser extractor
//! └── modules/             # Feature modules
//!     ├── auth/            # Registration and token issuance
//!     ├── students/        # Student CRUD and enrollment
//!     └── courses/         # Course CRUD
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: Business logic over the store traits
//! - `router.rs`: Axum router configuration
//!
//! ## Authentication
//!
//! Every route except registration, token issuance and the operational
//! endpoints requires `Authorization: Bearer <token>`. Each request is
//! authenticated from scratch: the token subject is resolved against the
//! student store and the token is verified against that identity. Failures
//! are answered with `403 {"error": "Invalid token or authentication failed."}`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use router::init_router;
pub use state::AppState;
