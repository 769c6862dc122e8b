//! Database constraint violations organized by functional area.
//!
//! This module provides an enumeration of all database constraint violations,
//! organized into logical groups for better maintainability.

pub mod identity_providers;

use std::fmt;

pub use identity_providers::IdentityProviderConstraints;
use serde::{Deserialize, Serialize};

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps all specific constraint types, providing a single interface
/// for handling any constraint violation while maintaining type safety and
/// organizational benefits of the separate modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    /// Identity provider table constraints
    IdentityProvider(IdentityProviderConstraints),
}

/// Categories of database constraint violations.
///
/// This enum helps classify constraint violations by their purpose and type,
/// making it easier to handle different categories of errors appropriately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Business logic constraints (domain-specific rules).
    BusinessLogic,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// This method attempts to parse a constraint name string into the corresponding
    /// enum variant. It returns `None` if the constraint name is not recognized.
    ///
    /// # Arguments
    ///
    /// * `constraint` - The name of the database constraint that was violated
    ///
    /// # Returns
    ///
    /// * `Some(ConstraintViolation)` if the constraint name is recognized
    /// * `None` if the constraint name is unknown
    ///
    /// # Examples
    ///
    /// ```
    /// use veilgate_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("identity_providers_org_id_name_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Route based on constraint name prefix so unrelated constraint names
        // are rejected without parsing attempts
        if constraint.starts_with("identity_providers_")
            && let Some(c) = IdentityProviderConstraints::new(constraint)
        {
            return Some(ConstraintViolation::IdentityProvider(c));
        }

        None
    }

    /// Returns the table name associated with this constraint.
    ///
    /// This is useful for categorizing errors by the table they affect.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::IdentityProvider(_) => "identity_providers",
        }
    }

    /// Returns the category of this constraint violation.
    ///
    /// This helps categorize errors by their type for better error handling and reporting.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::IdentityProvider(c) => c.categorize(),
        }
    }

    /// Returns the underlying constraint name as used in the database.
    #[inline]
    pub fn constraint_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::IdentityProvider(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("identity_providers_pkey"),
            Some(ConstraintViolation::IdentityProvider(
                IdentityProviderConstraints::OrgIdIdUnique
            ))
        );

        assert_eq!(
            ConstraintViolation::new("identity_providers_org_id_name_unique_idx"),
            Some(ConstraintViolation::IdentityProvider(
                IdentityProviderConstraints::OrgIdNameUnique
            ))
        );

        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
        assert_eq!(ConstraintViolation::new("accounts_email_unique_idx"), None);
    }

    #[test]
    fn test_table_name_extraction() {
        let violation =
            ConstraintViolation::IdentityProvider(IdentityProviderConstraints::OrgIdNameUnique);
        assert_eq!(violation.table_name(), "identity_providers");
    }

    #[test]
    fn test_constraint_categorization() {
        let violation =
            ConstraintViolation::IdentityProvider(IdentityProviderConstraints::OrgIdIdUnique);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Uniqueness
        );

        let violation =
            ConstraintViolation::IdentityProvider(IdentityProviderConstraints::NameLength);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );
    }

    #[test]
    fn test_constraint_name_method() {
        let violation =
            ConstraintViolation::IdentityProvider(IdentityProviderConstraints::OrgIdNameUnique);
        assert_eq!(
            violation.constraint_name(),
            "identity_providers_org_id_name_unique_idx"
        );
    }
}
