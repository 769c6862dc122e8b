//! Provider type enumeration for categorizing identity providers.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the federation protocol family of an identity provider.
///
/// This enumeration corresponds to the `PROVIDER_TYPE` PostgreSQL enum. It only
/// distinguishes which configuration fields a provider record populates and which
/// update path applies to it; no protocol execution happens in this crate.
///
/// SAML providers carry a redirect URL and an optional SCIM provisioning
/// endpoint. LDAP and OIDC providers carry an audience URI and a client
/// identifier, and share one update path.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ProviderType"]
pub enum ProviderType {
    /// SAML 2.0 federation (Okta, OneLogin, ADFS)
    #[db_rename = "saml"]
    #[serde(rename = "saml")]
    #[default]
    Saml,

    /// LDAP directories (Active Directory, OpenLDAP, FreeIPA)
    #[db_rename = "ldap"]
    #[serde(rename = "ldap")]
    Ldap,

    /// OpenID Connect providers
    #[db_rename = "oidc"]
    #[serde(rename = "oidc")]
    Oidc,
}

impl ProviderType {
    /// Returns whether records of this type populate the SAML field group
    /// (redirect URL, SCIM endpoint).
    pub fn is_saml(&self) -> bool {
        matches!(self, ProviderType::Saml)
    }

    /// Returns whether records of this type populate the federated-directory
    /// field group (audience URI, client ID).
    pub fn is_federated_directory(&self) -> bool {
        matches!(self, ProviderType::Ldap | ProviderType::Oidc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_groups_are_disjoint() {
        use strum::IntoEnumIterator;

        for provider_type in ProviderType::iter() {
            assert_ne!(
                provider_type.is_saml(),
                provider_type.is_federated_directory(),
                "{provider_type} must belong to exactly one field group"
            );
        }
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&ProviderType::Saml).unwrap();
        assert_eq!(json, "\"saml\"");

        let parsed: ProviderType = serde_json::from_str("\"oidc\"").unwrap();
        assert_eq!(parsed, ProviderType::Oidc);
    }
}
