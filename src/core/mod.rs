//! Core business logic - framework-agnostic catalog operations.

/// Plant listing queries and creation
pub mod planta;
/// Reads over the promotional and per-type report views
pub mod report;
/// Default data seeding
pub mod seed;
/// Plant type queries
pub mod tipo_planta;
/// Validation of inbound plant payloads
pub mod validation;
