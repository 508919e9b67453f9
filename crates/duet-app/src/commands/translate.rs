use std::time::Duration;

use anyhow::Context;
use duet_core::{AutoCopyPolicy, resolve, select_secondary};
use duet_io::{ClipboardSink, SystemClipboard};
use duet_translator::{DeepLClient, Translator};
use duet_types::{LanguageCode, ResolvedTranslation, TranslationMode};
use tokio_util::sync::CancellationToken;

use crate::profile::LoadedProfile;
use crate::state::AppState;

pub async fn handle_translate(
    state: &mut AppState,
    text: Option<String>,
    allow_copy: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => duet_io::read_selection().await?.unwrap_or_default(),
    };

    let mut translator_config = state.profile.config().translator.clone();
    translator_config.apply_env();

    let credential = state.credentials.retrieve().await?;
    let client = DeepLClient::new(
        credential,
        translator_config.api_url,
        Duration::from_secs(translator_config.timeout_seconds),
    )?;
    let clipboard = SystemClipboard::new(Duration::from_secs(
        state.profile.config().clipboard.hold_seconds,
    ));

    let result = translate_with(
        &mut state.profile,
        &client,
        &clipboard,
        &text,
        allow_copy,
        cancel,
    )
    .await;
    client.destroy();

    result.map(|_| ())
}

/// Translate `text` with the profile's languages, print the result and copy
/// it when the profile's auto-copy policy allows.
///
/// Returns `None` when the translation was cancelled; nothing is shown then.
pub async fn translate_with(
    profile: &mut LoadedProfile,
    translator: &dyn Translator,
    clipboard: &dyn ClipboardSink,
    text: &str,
    allow_copy: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<Option<ResolvedTranslation>> {
    let (main, secondary) = current_languages(profile)?;
    tracing::debug!("Using {} translator", translator.metadata().name);

    let resolved = match resolve(translator, text, main, secondary, cancel).await {
        Ok(resolved) => resolved,
        Err(e) if e.is_cancelled() => {
            tracing::info!("Translation cancelled");
            return Ok(None);
        }
        Err(e) => {
            if e.is_configuration_problem() {
                tracing::warn!("Translation not attempted: {e}");
            } else {
                tracing::error!("Translation failed: {e}");
            }
            let message = e.user_message().unwrap_or_else(|| e.to_string());
            anyhow::bail!("{message}");
        }
    };

    let mode = match resolved.mode {
        TranslationMode::Main => "reading",
        TranslationMode::Secondary => "writing",
    };
    tracing::info!(
        "Translated {} -> {} ({mode} mode)",
        resolved.detected_source_lang.as_deref().unwrap_or("?"),
        resolved.target
    );

    println!("{}", resolved.text);

    let policy = AutoCopyPolicy::from(&profile.config().clipboard);
    if allow_copy && policy.should_copy(resolved.mode) {
        match clipboard.copy_text(resolved.text.clone()).await {
            Ok(()) => tracing::info!("Copied translation to clipboard"),
            Err(e) => tracing::warn!("Failed to copy translation: {e}"),
        }
    }

    Ok(Some(resolved))
}

/// Main and current secondary language. A secondary selection that is no
/// longer available is reset to the first one and saved.
fn current_languages(profile: &mut LoadedProfile) -> anyhow::Result<(LanguageCode, LanguageCode)> {
    let languages = profile
        .config()
        .validate()
        .with_context(|| format!("Invalid language settings in profile {}", profile.name()))?;

    let secondary = select_secondary(&languages.available, languages.last_used)
        .context("No secondary language configured")?;

    if languages.last_used != Some(secondary) {
        tracing::info!("Secondary language reset to {secondary}");
        profile.config_mut().languages.last_used_language = secondary.to_string();
        profile.save()?;
    }

    Ok((languages.main, secondary))
}
