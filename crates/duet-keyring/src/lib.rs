mod backend;
mod store;

pub use backend::{KeyringBackend, MemoryBackend, SecretBackend, KEYRING_ACCOUNT, KEYRING_SERVICE};
pub use store::{CredentialStore, LegacyApiKey};

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Keyring task failed: {0}")]
    Task(String),

    #[error("Failed to clear legacy API key: {0}")]
    LegacySettings(String),
}
