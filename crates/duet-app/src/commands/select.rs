use anyhow::Context;
use duet_types::LanguageCode;

use crate::state::AppState;

pub fn handle_select(state: &mut AppState, language: &str) -> anyhow::Result<()> {
    let lang: LanguageCode = language.trim().to_uppercase().parse()?;

    let languages = state
        .profile
        .config()
        .validate()
        .context("Invalid language settings")?;

    if !languages.available.contains(&lang) {
        let available: Vec<&str> = languages.available.iter().map(|l| l.as_str()).collect();
        anyhow::bail!(
            "{lang} is not one of the secondary languages ({})",
            available.join(", ")
        );
    }

    state.profile.config_mut().languages.last_used_language = lang.to_string();
    state.profile.save()?;

    tracing::info!("Secondary language set to {lang}");
    println!("Secondary language: {} ({})", lang.name(), lang);
    Ok(())
}
