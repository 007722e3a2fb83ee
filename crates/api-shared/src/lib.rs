//! # API Shared
//!
//! Shared wire definitions for the song library APIs.
//!
//! Contains:
//! - Request/response DTOs (`wire` module), serialisable with serde and documented with utoipa
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; kept free of core/business dependencies.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
