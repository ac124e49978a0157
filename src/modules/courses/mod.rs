//! Course CRUD. `POST /api/enroll` is the creation endpoint.

pub mod controller;
pub mod router;
pub mod service;
