//! Registration and token issuance. Neither route requires a bearer token.

pub mod controller;
pub mod router;
pub mod service;
