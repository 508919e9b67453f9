use anyhow::Context;
use clap::Parser;
use duet_keyring::{CredentialStore, SecretBackend};
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub mod cli;
pub mod commands;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::Args;
use self::commands::handle_command;
use self::profile::{LoadedProfile, ProfileStore};
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let store = ProfileStore::default_location()?;
    let mut profile = store.load(&args.profile)?;

    let credentials = CredentialStore::keyring();
    migrate_legacy_key(&credentials, &mut profile, args.command.needs_credential()).await?;

    let mut state = AppState::new(profile, credentials);

    // One token per invocation, cancelled by Ctrl+C
    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if signal::ctrl_c().await.is_ok() {
                tracing::info!("Cancellation requested");
                cancel.cancel();
            }
        }
    });

    let result = handle_command(&mut state, args.command, &cancel).await;
    ctrl_c.abort();

    result
}

/// Move a plaintext key left in the profile into the keyring.
///
/// Failure only stops commands that use the key; the others log it and go
/// on, and the move is retried on the next start.
pub async fn migrate_legacy_key<B: SecretBackend>(
    credentials: &CredentialStore<B>,
    profile: &mut LoadedProfile,
    needs_credential: bool,
) -> anyhow::Result<()> {
    match credentials.migrate_from_legacy_config(profile).await {
        Ok(_) => Ok(()),
        Err(e) if !needs_credential => {
            tracing::warn!("Could not move the API key into the keyring: {e}");
            Ok(())
        }
        Err(e) => {
            Err(e).context("Failed to move the API key from settings into the keyring")
        }
    }
}
