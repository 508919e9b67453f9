use duet_types::LanguageCode;

use crate::state::AppState;

pub fn handle_languages(state: &AppState) -> anyhow::Result<()> {
    let languages = state.profile.config().validate().ok();

    for lang in LanguageCode::ALL {
        let marker = match &languages {
            Some(l) if l.main == lang => "main",
            Some(l) if l.last_used == Some(lang) && l.available.contains(&lang) => "selected",
            Some(l) if l.available.contains(&lang) => "secondary",
            _ => "",
        };

        println!("{:<6} {:<22} {marker}", lang.as_str(), lang.name());
    }

    Ok(())
}
