use anyhow::Context;
use duet_config::languages::{LanguageConfig, Languages};
use duet_core::select_secondary;

use crate::cli::ConfigAction;
use crate::profile::LoadedProfile;

pub fn handle_config(profile: &mut LoadedProfile, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => show(profile),
        ConfigAction::Main { language } => {
            let languages = update_languages(profile, |config| {
                config.main_language = normalize(&language);
            })?;
            println!("Main language: {} ({})", languages.main.name(), languages.main);
            Ok(())
        }
        ConfigAction::Languages { languages } => {
            let languages = update_languages(profile, |config| {
                config.available_languages = languages.iter().map(|code| normalize(code)).collect();
            })?;
            let codes: Vec<&str> = languages.available.iter().map(|l| l.as_str()).collect();
            println!("Secondary languages: {}", codes.join(", "));
            Ok(())
        }
        ConfigAction::AutoCopy { main, secondary } => {
            if main.is_none() && secondary.is_none() {
                anyhow::bail!("Nothing to change, pass --main and/or --secondary");
            }

            let clipboard = &mut profile.config_mut().clipboard;
            if let Some(main) = main {
                clipboard.auto_copy_to_primary = main;
            }
            if let Some(secondary) = secondary {
                clipboard.auto_copy_to_secondary = secondary;
            }
            profile.save()?;

            tracing::info!("Auto-copy settings updated");
            show_auto_copy(profile);
            Ok(())
        }
    }
}

/// Apply `edit` to a copy of the language settings and save it only if the
/// result is valid. A secondary selection that the edit removed falls back
/// to the first secondary language.
fn update_languages(
    profile: &mut LoadedProfile,
    edit: impl FnOnce(&mut LanguageConfig),
) -> anyhow::Result<Languages> {
    let mut config = profile.config().languages.clone();
    edit(&mut config);

    let mut languages = config.validate().context("Settings not saved")?;

    let secondary = select_secondary(&languages.available, languages.last_used);
    if secondary != languages.last_used {
        config.last_used_language = secondary.map(|l| l.to_string()).unwrap_or_default();
        languages.last_used = secondary;
    }

    profile.config_mut().languages = config;
    profile.save()?;

    tracing::info!("Language settings updated in profile {}", profile.name());
    Ok(languages)
}

fn show(profile: &LoadedProfile) -> anyhow::Result<()> {
    let languages = profile
        .config()
        .validate()
        .context("Invalid language settings")?;

    println!("Profile: {}", profile.name());
    println!("Main language: {} ({})", languages.main.name(), languages.main);

    let secondary: Vec<String> = languages
        .available
        .iter()
        .map(|lang| {
            if Some(*lang) == languages.last_used {
                format!("{lang}*")
            } else {
                lang.to_string()
            }
        })
        .collect();
    println!("Secondary languages: {}", secondary.join(", "));

    show_auto_copy(profile);
    Ok(())
}

fn show_auto_copy(profile: &LoadedProfile) {
    let clipboard = &profile.config().clipboard;
    println!(
        "Auto-copy: main {}, secondary {}",
        on_off(clipboard.auto_copy_to_primary),
        on_off(clipboard.auto_copy_to_secondary)
    );
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
