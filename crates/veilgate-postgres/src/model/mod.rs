//! Database models for all entities in the system.
//!
//! This module contains Diesel model definitions for all database tables,
//! including structs for querying, inserting, and updating records.

mod identity_provider;

pub use identity_provider::{
    IdentityProvider, IdentityProviderChanges, LoginOption, NewIdentityProvider,
    UpdateLdapIdentityProvider, UpdateSamlIdentityProvider,
};
