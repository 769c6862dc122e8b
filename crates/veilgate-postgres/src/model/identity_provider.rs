//! Identity provider model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::identity_providers;
use crate::types::{IntegrationType, ProviderType};

/// Identity provider model representing an external IDP configured for an organization.
///
/// A record stores configuration only; the federation handshake itself happens
/// elsewhere. Which optional fields are populated depends on [`ProviderType`]:
/// SAML providers carry `redirect_url` and `scim_endpoint`, LDAP/OIDC providers
/// carry `audience_uri` and `client_id`. The other group stays untouched for
/// the life of the record.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = identity_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IdentityProvider {
    /// Unique provider identifier within the organization
    pub id: Uuid,
    /// Organization this provider belongs to
    pub org_id: Uuid,
    /// Human-readable provider name, unique within the organization
    pub name: String,
    /// Federation protocol family of the provider
    pub provider_type: ProviderType,
    /// Provider-specific configuration payload, stored opaquely
    pub metadata: serde_json::Value,
    /// Whether this provider is offered for login
    pub is_enabled: bool,
    /// Assertion consumer redirect URL (SAML)
    pub redirect_url: Option<String>,
    /// Audience URI (LDAP/OIDC)
    pub audience_uri: Option<String>,
    /// Client identifier registered with the provider (LDAP/OIDC)
    pub client_id: Option<String>,
    /// Provider service endpoint URL
    pub endpoint: String,
    /// Account that created or last updated the record
    pub created_by: Uuid,
    /// Timestamp of the last mutation, supplied by the caller
    pub last_updated: Timestamp,
    /// SCIM provisioning endpoint (SAML)
    pub scim_endpoint: Option<String>,
    /// Integration surface the provider was onboarded for, fixed at creation
    pub integration_type: IntegrationType,
}

/// Data for creating a new identity provider.
///
/// Every column is caller-supplied, including the identifier and the initial
/// `last_updated` timestamp; nothing is default-filled.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = identity_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewIdentityProvider {
    /// Provider ID, unique within the organization
    pub id: Uuid,
    /// Organization ID
    pub org_id: Uuid,
    /// Provider name, unique within the organization
    pub name: String,
    /// Federation protocol family
    pub provider_type: ProviderType,
    /// Provider-specific configuration payload
    pub metadata: serde_json::Value,
    /// Whether the provider starts out enabled
    pub is_enabled: bool,
    /// Redirect URL (SAML)
    pub redirect_url: Option<String>,
    /// Audience URI (LDAP/OIDC)
    pub audience_uri: Option<String>,
    /// Client ID (LDAP/OIDC)
    pub client_id: Option<String>,
    /// Provider service endpoint URL
    pub endpoint: String,
    /// Creating account
    pub created_by: Uuid,
    /// Initial mutation timestamp
    pub last_updated: Timestamp,
    /// SCIM provisioning endpoint (SAML)
    pub scim_endpoint: Option<String>,
    /// Integration surface, immutable after creation
    pub integration_type: IntegrationType,
}

/// Data for updating a SAML identity provider.
///
/// Carries exactly the mutable SAML-relevant columns; the LDAP/OIDC field
/// group (`audience_uri`, `client_id`) cannot be expressed here, so a SAML
/// update can never clobber it. `None` values overwrite the column with NULL
/// rather than skipping it: every listed column is rewritten on each update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = identity_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UpdateSamlIdentityProvider {
    /// Provider-specific configuration payload
    pub metadata: serde_json::Value,
    /// Whether the provider is offered for login
    pub is_enabled: bool,
    /// Provider service endpoint URL
    pub endpoint: String,
    /// Account performing the update
    pub created_by: Uuid,
    /// Caller-supplied mutation timestamp
    pub last_updated: Timestamp,
    /// Redirect URL
    pub redirect_url: Option<String>,
    /// SCIM provisioning endpoint
    pub scim_endpoint: Option<String>,
}

/// Data for updating an LDAP or OIDC identity provider.
///
/// Mirror of [`UpdateSamlIdentityProvider`] for the federated-directory field
/// group; the SAML-only columns (`redirect_url`, `scim_endpoint`) cannot be
/// expressed here.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = identity_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UpdateLdapIdentityProvider {
    /// Provider-specific configuration payload
    pub metadata: serde_json::Value,
    /// Whether the provider is offered for login
    pub is_enabled: bool,
    /// Provider service endpoint URL
    pub endpoint: String,
    /// Account performing the update
    pub created_by: Uuid,
    /// Caller-supplied mutation timestamp
    pub last_updated: Timestamp,
    /// Audience URI
    pub audience_uri: Option<String>,
    /// Client identifier
    pub client_id: Option<String>,
}

/// Type-matched changeset for an identity provider update.
///
/// Selecting the update path through this enum makes a mismatched update a
/// compile-time error: there is no variant that touches both field groups,
/// and dispatch over the variants is exhaustive.
#[derive(Debug, Clone)]
pub enum IdentityProviderChanges {
    /// Update the SAML field group
    Saml(UpdateSamlIdentityProvider),
    /// Update the LDAP/OIDC field group
    Ldap(UpdateLdapIdentityProvider),
}

/// Reduced identity provider projection for the pre-authentication login page.
///
/// Deliberately excludes organization scope and configuration payloads so the
/// cross-organization login-option listing leaks nothing beyond what the login
/// form needs to render.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = identity_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LoginOption {
    /// Provider name shown to the user
    pub name: String,
    /// Federation protocol family
    pub provider_type: ProviderType,
    /// Provider service endpoint URL
    pub endpoint: String,
}

impl IdentityProvider {
    /// Returns whether this provider is currently offered on the login page.
    ///
    /// Only enabled SAML providers appear in the pre-authentication listing.
    pub fn offered_for_login(&self) -> bool {
        self.is_enabled && self.provider_type.is_saml()
    }

    /// Builds the type-matched changeset carrying this record's mutable fields.
    ///
    /// The caller adjusts the returned changeset (new metadata, a fresh
    /// `last_updated`) and submits it through the update operation; the match
    /// below is the single place where a provider type selects its update path.
    pub fn changes(&self) -> IdentityProviderChanges {
        match self.provider_type {
            ProviderType::Saml => IdentityProviderChanges::Saml(UpdateSamlIdentityProvider {
                metadata: self.metadata.clone(),
                is_enabled: self.is_enabled,
                endpoint: self.endpoint.clone(),
                created_by: self.created_by,
                last_updated: self.last_updated,
                redirect_url: self.redirect_url.clone(),
                scim_endpoint: self.scim_endpoint.clone(),
            }),
            ProviderType::Ldap | ProviderType::Oidc => {
                IdentityProviderChanges::Ldap(UpdateLdapIdentityProvider {
                    metadata: self.metadata.clone(),
                    is_enabled: self.is_enabled,
                    endpoint: self.endpoint.clone(),
                    created_by: self.created_by,
                    last_updated: self.last_updated,
                    audience_uri: self.audience_uri.clone(),
                    client_id: self.client_id.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(provider_type: ProviderType) -> IdentityProvider {
        IdentityProvider {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            name: "okta-saml".to_string(),
            provider_type,
            metadata: serde_json::json!({"entity_id": "https://okta/entity"}),
            is_enabled: true,
            redirect_url: Some("https://veilgate/callback".to_string()),
            audience_uri: None,
            client_id: None,
            endpoint: "https://okta/sso".to_string(),
            created_by: Uuid::new_v4(),
            last_updated: jiff::Timestamp::UNIX_EPOCH.into(),
            scim_endpoint: None,
            integration_type: IntegrationType::Federation,
        }
    }

    #[test]
    fn saml_record_selects_saml_changeset() {
        let record = provider(ProviderType::Saml);

        match record.changes() {
            IdentityProviderChanges::Saml(changes) => {
                assert_eq!(changes.endpoint, record.endpoint);
                assert_eq!(changes.redirect_url, record.redirect_url);
            }
            IdentityProviderChanges::Ldap(_) => panic!("SAML record produced an LDAP changeset"),
        }
    }

    #[test]
    fn ldap_and_oidc_records_select_ldap_changeset() {
        for provider_type in [ProviderType::Ldap, ProviderType::Oidc] {
            let record = provider(provider_type);

            assert!(matches!(
                record.changes(),
                IdentityProviderChanges::Ldap(_)
            ));
        }
    }

    #[test]
    fn only_enabled_saml_providers_are_offered_for_login() {
        let mut record = provider(ProviderType::Saml);
        assert!(record.offered_for_login());

        record.is_enabled = false;
        assert!(!record.offered_for_login());

        let mut record = provider(ProviderType::Oidc);
        record.is_enabled = true;
        assert!(!record.offered_for_login());
    }
}
