use std::sync::Mutex;

use async_trait::async_trait;
use keyring::Entry;

use crate::SecretError;

/// Keyring service name, the schema under which the key is filed
pub const KEYRING_SERVICE: &str = "duet.translator";
/// Keyring account, the `api-key` attribute value
pub const KEYRING_ACCOUNT: &str = "translator";

/// Storage for a single secret
#[async_trait]
pub trait SecretBackend: Send + Sync {
    async fn store(&self, secret: &str) -> Result<(), SecretError>;

    /// `None` when nothing is stored
    async fn retrieve(&self) -> Result<Option<String>, SecretError>;

    /// Succeeds when nothing is stored
    async fn clear(&self) -> Result<(), SecretError>;
}

/// OS keyring (Secret Service, Keychain, Credential Manager)
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    service: String,
    account: String,
}

impl KeyringBackend {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    /// Keyring calls block, so each one runs on the blocking pool
    async fn with_entry<T, F>(&self, op: F) -> Result<T, SecretError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, keyring::Error> + Send + 'static,
    {
        let service = self.service.clone();
        let account = self.account.clone();

        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &account)?;
            op(entry)
        })
        .await
        .map_err(|e| SecretError::Task(e.to_string()))?
        .map_err(|e| SecretError::Keyring(e.to_string()))
    }
}

impl Default for KeyringBackend {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
    }
}

#[async_trait]
impl SecretBackend for KeyringBackend {
    async fn store(&self, secret: &str) -> Result<(), SecretError> {
        let secret = secret.to_string();
        self.with_entry(move |entry| entry.set_password(&secret))
            .await
    }

    async fn retrieve(&self) -> Result<Option<String>, SecretError> {
        self.with_entry(|entry| match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn clear(&self) -> Result<(), SecretError> {
        self.with_entry(|entry| match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        })
        .await
    }
}

/// Process-local backend for tests and keyring-less setups
#[derive(Debug, Default)]
pub struct MemoryBackend {
    secret: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Mutex::new(Some(secret.to_string())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.secret
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SecretBackend for MemoryBackend {
    async fn store(&self, secret: &str) -> Result<(), SecretError> {
        *self.slot() = Some(secret.to_string());
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<String>, SecretError> {
        Ok(self.slot().clone())
    }

    async fn clear(&self) -> Result<(), SecretError> {
        self.slot().take();
        Ok(())
    }
}
