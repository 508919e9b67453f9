use tokio_util::sync::CancellationToken;

use crate::cli::Command;
use crate::state::AppState;

pub mod config;
pub mod key;
pub mod languages;
pub mod select;
pub mod translate;

use config::handle_config;
use key::handle_key;
use languages::handle_languages;
use select::handle_select;
use translate::handle_translate;

pub async fn handle_command(
    state: &mut AppState,
    command: Command,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        Command::Translate { text, no_copy } => {
            handle_translate(state, text, !no_copy, cancel).await
        }
        Command::Select { language } => handle_select(state, &language),
        Command::Languages => handle_languages(state),
        Command::Config { action } => handle_config(&mut state.profile, action),
        Command::Key { action } => handle_key(state, action).await,
    }
}
