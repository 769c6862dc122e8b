//! Identity provider repository for managing organization-scoped IDP configurations.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use futures::StreamExt;
use uuid::Uuid;

use crate::model::{
    IdentityProvider, IdentityProviderChanges, LoginOption, NewIdentityProvider,
    UpdateLdapIdentityProvider, UpdateSamlIdentityProvider,
};
use crate::types::ProviderType;
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for identity provider database operations.
///
/// Handles the full configuration lifecycle: creation, organization-scoped
/// lookups, type-matched partial updates, and the enable/disable toggle.
/// Removal is deliberately not part of this surface.
///
/// The update operations and the toggle are keyed by `(org_id, id)` and
/// complete without error when no row matches; callers that need to
/// distinguish "updated" from "absent" must perform their own lookup first.
pub trait IdentityProviderRepository {
    /// Creates a new identity provider with the provided configuration.
    ///
    /// All columns are caller-supplied. A duplicate `(org_id, id)` or
    /// `(org_id, name)` pair fails with the constraint violation surfaced
    /// verbatim (see [`PgError::constraint_violation`]).
    fn create_identity_provider(
        &mut self,
        provider: NewIdentityProvider,
    ) -> impl Future<Output = PgResult<IdentityProvider>> + Send;

    /// Finds a provider by its identifier within an organization.
    ///
    /// A missing record surfaces as the underlying no-rows error; callers
    /// branch on [`PgError::is_not_found`] for 404-style handling.
    fn find_identity_provider_by_id(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
    ) -> impl Future<Output = PgResult<IdentityProvider>> + Send;

    /// Finds a provider by name within an organization.
    ///
    /// Relies on the per-organization name uniqueness enforced by the schema;
    /// same not-found contract as [`find_identity_provider_by_id`].
    ///
    /// [`find_identity_provider_by_id`]: IdentityProviderRepository::find_identity_provider_by_id
    fn find_identity_provider_by_name(
        &mut self,
        org_id: Uuid,
        provider_name: &str,
    ) -> impl Future<Output = PgResult<IdentityProvider>> + Send;

    /// Lists every identity provider configured for an organization.
    ///
    /// Returns an empty vector (never an error) when the organization has no
    /// providers. Rows that fail to decode are logged and skipped.
    fn list_org_identity_providers(
        &mut self,
        org_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<IdentityProvider>>> + Send;

    /// Lists the SAML login options across all organizations.
    ///
    /// This reduced-field projection backs the pre-authentication login page,
    /// so it runs without an organization scope and must not expose full
    /// configuration. Disabled providers are included; filtering on
    /// `is_enabled` is the caller's presentation decision.
    fn list_login_options(&mut self)
    -> impl Future<Output = PgResult<Vec<LoginOption>>> + Send;

    /// Applies a type-matched changeset to a provider.
    ///
    /// The exhaustive match over [`IdentityProviderChanges`] is what keeps a
    /// SAML record from ever travelling down the LDAP update path and vice
    /// versa.
    fn update_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: IdentityProviderChanges,
    ) -> impl Future<Output = PgResult<()>> + Send;

    /// Overwrites the mutable SAML field group of a provider.
    ///
    /// Touches metadata, is_enabled, endpoint, created_by, last_updated,
    /// redirect_url, and scim_endpoint; never audience_uri or client_id.
    fn update_saml_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: UpdateSamlIdentityProvider,
    ) -> impl Future<Output = PgResult<()>> + Send;

    /// Overwrites the mutable LDAP/OIDC field group of a provider.
    ///
    /// Touches metadata, is_enabled, endpoint, created_by, last_updated,
    /// audience_uri, and client_id; never redirect_url or scim_endpoint.
    fn update_ldap_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: UpdateLdapIdentityProvider,
    ) -> impl Future<Output = PgResult<()>> + Send;

    /// Enables or disables a provider without resubmitting its configuration.
    ///
    /// Touches only `is_enabled` and `last_updated`. Idempotent: repeating the
    /// same value leaves the enabled state unchanged while `last_updated`
    /// still advances to the supplied timestamp.
    fn set_identity_provider_enabled(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        last_updated: jiff::Timestamp,
        is_enabled: bool,
    ) -> impl Future<Output = PgResult<()>> + Send;
}

impl IdentityProviderRepository for PgConnection {
    async fn create_identity_provider(
        &mut self,
        provider: NewIdentityProvider,
    ) -> PgResult<IdentityProvider> {
        use schema::identity_providers;

        let provider = diesel::insert_into(identity_providers::table)
            .values(&provider)
            .returning(IdentityProvider::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(provider)
    }

    async fn find_identity_provider_by_id(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
    ) -> PgResult<IdentityProvider> {
        use schema::identity_providers::{self, dsl};

        let provider = identity_providers::table
            .filter(dsl::org_id.eq(org_id))
            .filter(dsl::id.eq(provider_id))
            .select(IdentityProvider::as_select())
            .first(self)
            .await
            .map_err(PgError::from)?;

        Ok(provider)
    }

    async fn find_identity_provider_by_name(
        &mut self,
        org_id: Uuid,
        provider_name: &str,
    ) -> PgResult<IdentityProvider> {
        use schema::identity_providers::{self, dsl};

        let provider = identity_providers::table
            .filter(dsl::org_id.eq(org_id))
            .filter(dsl::name.eq(provider_name))
            .select(IdentityProvider::as_select())
            .first(self)
            .await
            .map_err(PgError::from)?;

        Ok(provider)
    }

    async fn list_org_identity_providers(
        &mut self,
        org_id: Uuid,
    ) -> PgResult<Vec<IdentityProvider>> {
        use schema::identity_providers::{self, dsl};

        let rows = identity_providers::table
            .filter(dsl::org_id.eq(org_id))
            .select(IdentityProvider::as_select())
            .load_stream(self)
            .await
            .map_err(PgError::from)?;
        futures::pin_mut!(rows);

        // Decode into a fresh value per row; a row that fails to decode is
        // reported and skipped, it never aborts the scan.
        let mut providers = Vec::new();
        while let Some(row) = rows.next().await {
            match row {
                Ok(provider) => providers.push(provider),
                Err(error) => {
                    tracing::error!(
                        target: TRACING_TARGET_QUERY,
                        error = %error,
                        %org_id,
                        "Skipping identity provider row that failed to decode"
                    );
                }
            }
        }

        Ok(providers)
    }

    async fn list_login_options(&mut self) -> PgResult<Vec<LoginOption>> {
        use schema::identity_providers::{self, dsl};

        let rows = identity_providers::table
            .filter(dsl::provider_type.eq(ProviderType::Saml))
            .select(LoginOption::as_select())
            .load_stream(self)
            .await
            .map_err(PgError::from)?;
        futures::pin_mut!(rows);

        let mut options = Vec::new();
        while let Some(row) = rows.next().await {
            match row {
                Ok(option) => options.push(option),
                Err(error) => {
                    tracing::error!(
                        target: TRACING_TARGET_QUERY,
                        error = %error,
                        "Skipping login option row that failed to decode"
                    );
                }
            }
        }

        Ok(options)
    }

    async fn update_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: IdentityProviderChanges,
    ) -> PgResult<()> {
        match changes {
            IdentityProviderChanges::Saml(changes) => {
                self.update_saml_identity_provider(org_id, provider_id, changes)
                    .await
            }
            IdentityProviderChanges::Ldap(changes) => {
                self.update_ldap_identity_provider(org_id, provider_id, changes)
                    .await
            }
        }
    }

    async fn update_saml_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: UpdateSamlIdentityProvider,
    ) -> PgResult<()> {
        use schema::identity_providers::{self, dsl};

        // Matching zero rows is not an error; the affected-row count is
        // deliberately unused.
        diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(org_id))
            .filter(dsl::id.eq(provider_id))
            .set(&changes)
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(())
    }

    async fn update_ldap_identity_provider(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        changes: UpdateLdapIdentityProvider,
    ) -> PgResult<()> {
        use schema::identity_providers::{self, dsl};

        diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(org_id))
            .filter(dsl::id.eq(provider_id))
            .set(&changes)
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(())
    }

    async fn set_identity_provider_enabled(
        &mut self,
        org_id: Uuid,
        provider_id: Uuid,
        last_updated: jiff::Timestamp,
        is_enabled: bool,
    ) -> PgResult<()> {
        use schema::identity_providers::{self, dsl};

        diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(org_id))
            .filter(dsl::id.eq(provider_id))
            .set((
                dsl::is_enabled.eq(is_enabled),
                dsl::last_updated.eq(jiff_diesel::Timestamp::from(last_updated)),
            ))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use diesel::pg::Pg;

    use super::*;
    use crate::schema::identity_providers::{self, dsl};

    fn saml_changes() -> UpdateSamlIdentityProvider {
        UpdateSamlIdentityProvider {
            metadata: serde_json::json!({"entity_id": "https://okta/entity"}),
            is_enabled: true,
            endpoint: "https://okta/sso".to_string(),
            created_by: Uuid::nil(),
            last_updated: jiff::Timestamp::UNIX_EPOCH.into(),
            redirect_url: Some("https://veilgate/callback".to_string()),
            scim_endpoint: None,
        }
    }

    fn ldap_changes() -> UpdateLdapIdentityProvider {
        UpdateLdapIdentityProvider {
            metadata: serde_json::json!({"base_dn": "dc=acme,dc=com"}),
            is_enabled: true,
            endpoint: "ldaps://directory.acme.com".to_string(),
            created_by: Uuid::nil(),
            last_updated: jiff::Timestamp::UNIX_EPOCH.into(),
            audience_uri: Some("urn:acme:veilgate".to_string()),
            client_id: Some("veilgate-client".to_string()),
        }
    }

    #[test]
    fn saml_update_never_touches_federation_columns() {
        let changes = saml_changes();
        let query = diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(Uuid::nil()))
            .filter(dsl::id.eq(Uuid::nil()))
            .set(&changes);

        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"redirect_url\""));
        assert!(sql.contains("\"scim_endpoint\""));
        assert!(!sql.contains("\"audience_uri\""));
        assert!(!sql.contains("\"client_id\""));
    }

    #[test]
    fn ldap_update_never_touches_saml_columns() {
        let changes = ldap_changes();
        let query = diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(Uuid::nil()))
            .filter(dsl::id.eq(Uuid::nil()))
            .set(&changes);

        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"audience_uri\""));
        assert!(sql.contains("\"client_id\""));
        assert!(!sql.contains("\"redirect_url\""));
        assert!(!sql.contains("\"scim_endpoint\""));
    }

    #[test]
    fn none_overwrites_instead_of_skipping() {
        // The SAML update rewrites every listed column; a None must become
        // SET scim_endpoint = NULL, not an omitted column.
        let mut changes = saml_changes();
        changes.scim_endpoint = None;

        let query = diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(Uuid::nil()))
            .filter(dsl::id.eq(Uuid::nil()))
            .set(&changes);

        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"scim_endpoint\""));
    }

    #[test]
    fn enable_toggle_touches_only_flag_and_timestamp() {
        let query = diesel::update(identity_providers::table)
            .filter(dsl::org_id.eq(Uuid::nil()))
            .filter(dsl::id.eq(Uuid::nil()))
            .set((
                dsl::is_enabled.eq(true),
                dsl::last_updated.eq(jiff_diesel::Timestamp::from(jiff::Timestamp::UNIX_EPOCH)),
            ));

        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"is_enabled\""));
        assert!(sql.contains("\"last_updated\""));
        assert!(!sql.contains("\"metadata\""));
        assert!(!sql.contains("\"endpoint\""));
    }

    #[test]
    fn login_option_projection_is_reduced() {
        let query = identity_providers::table
            .filter(dsl::provider_type.eq(ProviderType::Saml))
            .select(LoginOption::as_select());

        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("\"name\""));
        assert!(sql.contains("\"endpoint\""));
        assert!(!sql.contains("\"metadata\""));
        assert!(!sql.contains("\"org_id\""));
        // The login page must list SAML providers whether or not they are
        // currently enabled.
        assert!(!sql.contains("\"is_enabled\""));
    }
}
