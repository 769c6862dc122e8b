//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations, encapsulating common patterns and providing type-safe
//! interfaces. Every operation executes as a single statement against one
//! pooled connection; there is no caching and no cross-operation transaction.

pub mod identity_provider;

pub use identity_provider::IdentityProviderRepository;
