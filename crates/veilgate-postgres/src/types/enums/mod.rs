//! Database enumeration types for type-safe queries.
//!
//! This module provides strongly-typed enumerations that correspond to PostgreSQL ENUM types
//! defined in the database schema. Each enumeration provides serialization support for APIs
//! and database integration through Diesel.

pub mod integration_type;
pub mod provider_type;

pub use integration_type::IntegrationType;
pub use provider_type::ProviderType;
