use crate::cli::KeyAction;
use crate::state::AppState;

pub async fn handle_key(state: &AppState, action: KeyAction) -> anyhow::Result<()> {
    match action {
        KeyAction::Set { key } => {
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("API key is empty, use `duet key clear` to remove it");
            }
            state.credentials.store(key).await?;
            println!("API key stored in keyring");
        }
        KeyAction::Clear => {
            state.credentials.clear().await?;
            println!("API key removed from keyring");
        }
        KeyAction::Status => {
            let credential = state.credentials.retrieve().await?;
            if credential.is_empty() {
                println!("No API key stored");
            } else {
                println!("API key stored in keyring");
            }
        }
    }

    Ok(())
}
