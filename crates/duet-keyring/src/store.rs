use duet_types::Credential;

use crate::{KeyringBackend, SecretBackend, SecretError};

/// Settings that may still hold a plaintext API key from before the keyring
/// was used
pub trait LegacyApiKey {
    fn legacy_api_key(&self) -> String;

    /// Blank the plaintext field and persist the change
    fn clear_legacy_api_key(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// API key storage on top of a [`SecretBackend`]
pub struct CredentialStore<B = KeyringBackend> {
    backend: B,
}

impl CredentialStore<KeyringBackend> {
    pub fn keyring() -> Self {
        Self::new(KeyringBackend::default())
    }
}

impl<B: SecretBackend> CredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Store the key. An empty key removes the stored one.
    pub async fn store(&self, secret: &str) -> Result<(), SecretError> {
        if secret.is_empty() {
            return self.clear().await;
        }

        self.backend.store(secret).await?;
        tracing::info!("API key stored in keyring");
        Ok(())
    }

    /// Stored key, empty when there is none
    pub async fn retrieve(&self) -> Result<Credential, SecretError> {
        match self.backend.retrieve().await? {
            Some(secret) => {
                tracing::debug!("API key retrieved from keyring");
                Ok(Credential::new(secret))
            }
            None => {
                tracing::debug!("No API key found in keyring");
                Ok(Credential::default())
            }
        }
    }

    pub async fn clear(&self) -> Result<(), SecretError> {
        self.backend.clear().await?;
        tracing::info!("API key cleared from keyring");
        Ok(())
    }

    /// Move a plaintext key from settings into the keyring.
    ///
    /// Returns `false` when there was nothing to move. The settings field is
    /// only blanked after the keyring write succeeded.
    pub async fn migrate_from_legacy_config(
        &self,
        settings: &mut impl LegacyApiKey,
    ) -> Result<bool, SecretError> {
        let mut legacy = Credential::new(settings.legacy_api_key());
        if legacy.is_empty() {
            tracing::debug!("No API key in settings to migrate");
            return Ok(false);
        }

        if let Err(e) = self.backend.store(legacy.expose()).await {
            tracing::error!("API key migration failed: {e}");
            return Err(e);
        }
        legacy.wipe();

        settings
            .clear_legacy_api_key()
            .map_err(|e| SecretError::LegacySettings(e.to_string()))?;

        tracing::info!("Migrated API key from settings to keyring");
        Ok(true)
    }
}
