//! Identity providers table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Identity provider table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum IdentityProviderConstraints {
    // Identity provider uniqueness constraints
    #[strum(serialize = "identity_providers_pkey")]
    OrgIdIdUnique,
    #[strum(serialize = "identity_providers_org_id_name_unique_idx")]
    OrgIdNameUnique,

    // Identity provider validation constraints
    #[strum(serialize = "identity_providers_name_length")]
    NameLength,
    #[strum(serialize = "identity_providers_endpoint_not_empty")]
    EndpointNotEmpty,
    #[strum(serialize = "identity_providers_metadata_size")]
    MetadataSize,
}

impl IdentityProviderConstraints {
    /// Creates a new [`IdentityProviderConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            IdentityProviderConstraints::OrgIdIdUnique
            | IdentityProviderConstraints::OrgIdNameUnique => ConstraintCategory::Uniqueness,

            IdentityProviderConstraints::NameLength
            | IdentityProviderConstraints::EndpointNotEmpty
            | IdentityProviderConstraints::MetadataSize => ConstraintCategory::Validation,
        }
    }
}

impl From<IdentityProviderConstraints> for String {
    #[inline]
    fn from(val: IdentityProviderConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for IdentityProviderConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
