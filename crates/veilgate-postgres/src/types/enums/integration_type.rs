//! Integration type enumeration for identity provider records.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the integration surface an identity provider was onboarded for.
///
/// This enumeration corresponds to the `INTEGRATION_TYPE` PostgreSQL enum. It is
/// fixed at creation time and never touched by the update operations.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::IntegrationType"]
pub enum IntegrationType {
    /// Federated login only
    #[db_rename = "federation"]
    #[serde(rename = "federation")]
    #[default]
    Federation,

    /// Directory-backed user lookup (LDAP-style)
    #[db_rename = "directory"]
    #[serde(rename = "directory")]
    Directory,

    /// Login plus SCIM user provisioning
    #[db_rename = "provisioning"]
    #[serde(rename = "provisioning")]
    Provisioning,
}
