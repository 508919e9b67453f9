use std::time::{Duration, Instant};

use arboard::Clipboard;
use async_trait::async_trait;

/// Text to translate: the primary selection (Linux) first, then the
/// clipboard. `None` when both are empty.
pub async fn read_selection() -> Result<Option<String>, anyhow::Error> {
    tokio::task::spawn_blocking(|| -> Result<Option<String>, anyhow::Error> {
        let mut clipboard = Clipboard::new()?;

        if let Some(text) = primary_text(&mut clipboard) {
            tracing::debug!("Using primary selection");
            return Ok(Some(text));
        }

        match clipboard.get_text() {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!("Using clipboard");
                Ok(Some(text))
            }
            Ok(_) | Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    })
    .await?
}

/// Where finished translations are copied to
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn copy_text(&self, text: String) -> Result<(), anyhow::Error>;
}

/// The desktop clipboard.
///
/// On Linux the copying process owns the text until someone else takes it,
/// so `copy_text` blocks for up to `hold`, or until a clipboard manager or
/// paste target replaces the contents.
pub struct SystemClipboard {
    hold: Duration,
}

impl SystemClipboard {
    pub fn new(hold: Duration) -> Self {
        Self { hold }
    }
}

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn copy_text(&self, text: String) -> Result<(), anyhow::Error> {
        let deadline = hold_deadline(Instant::now(), self.hold);

        tokio::task::spawn_blocking(move || -> Result<(), anyhow::Error> {
            let mut clipboard = Clipboard::new()?;
            set_text(&mut clipboard, text, deadline)?;
            Ok(())
        })
        .await?
    }
}

fn hold_deadline(now: Instant, hold: Duration) -> Option<Instant> {
    (!hold.is_zero()).then(|| now + hold)
}

#[cfg(target_os = "linux")]
fn set_text(
    clipboard: &mut Clipboard,
    text: String,
    deadline: Option<Instant>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match deadline {
        Some(deadline) => {
            tracing::debug!("Holding clipboard until it is taken over");
            clipboard.set().wait_until(deadline).text(text)
        }
        None => clipboard.set_text(text),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(
    clipboard: &mut Clipboard,
    text: String,
    _deadline: Option<Instant>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[cfg(target_os = "linux")]
fn primary_text(clipboard: &mut Clipboard) -> Option<String> {
    use arboard::{GetExtLinux, LinuxClipboardKind};

    clipboard
        .get()
        .clipboard(LinuxClipboardKind::Primary)
        .text()
        .ok()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(not(target_os = "linux"))]
fn primary_text(_clipboard: &mut Clipboard) -> Option<String> {
    None
}
