//! # Coursebook CLI
//!
//! Administrative and seeding utilities used by the `coursebook-cli` binary.
//!
//! Everything goes through the store traits from `coursebook-db`, so the same
//! code seeds PostgreSQL in production and the in-memory store in tests.
//!
//! ```ignore
//! use coursebook_cli::seeder::{seed_all, SeedConfig};
//!
//! let store = PgStore::new(pool);
//! seed_all(&store, &store, SeedConfig::default(), 12).await?;
//! ```

pub mod seeder;
