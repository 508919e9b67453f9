use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("Unsupported language code: {0:?}")]
    InvalidLanguage(String),

    #[error("No text to translate")]
    EmptyInput,

    #[error("Authentication failed")]
    AuthFailure { message: Option<String> },

    #[error("Quota exceeded")]
    QuotaExceeded { message: Option<String> },

    #[error("Bad request")]
    BadRequest { message: Option<String> },

    #[error("API error ({status}): {body}")]
    RemoteError { status: u16, body: String },

    #[error("No translation in response")]
    EmptyResponse,

    #[error("Failed to parse response: {0}")]
    ResponseParseError(String),

    #[error("Translation cancelled")]
    Cancelled,

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

impl TranslateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TranslateError::Cancelled)
    }

    /// Errors the user fixes in settings rather than by retrying
    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            TranslateError::MissingCredential | TranslateError::InvalidLanguage(_)
        )
    }

    /// Text to show the user, `None` when nothing should be shown
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            TranslateError::Cancelled => return None,
            TranslateError::MissingCredential => {
                "API key not configured. Set it with `duet key set <KEY>`.".to_string()
            }
            TranslateError::InvalidLanguage(code) => {
                format!("Unsupported language {code:?}. Check the language settings of your profile.")
            }
            TranslateError::EmptyInput => "No text found. Select or copy text first.".to_string(),
            TranslateError::AuthFailure { message } => with_reason(
                "Authentication failed. Check your API key.",
                message.as_deref(),
            ),
            TranslateError::QuotaExceeded { message } => with_reason(
                "Quota exceeded. You have used all your translation quota.",
                message.as_deref(),
            ),
            TranslateError::BadRequest { message } => with_reason(
                "Bad request. Check your language codes.",
                message.as_deref(),
            ),
            TranslateError::RemoteError { status, body } => format!("API error ({status}): {body}"),
            TranslateError::Timeout => "Translation timed out. Try again.".to_string(),
            TranslateError::Network(_) => "Could not reach the translation service.".to_string(),
            TranslateError::EmptyResponse | TranslateError::ResponseParseError(_) => {
                "Translation failed.".to_string()
            }
        };

        Some(message)
    }
}

fn with_reason(base: &str, reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => format!("{base} ({reason})"),
        _ => base.to_string(),
    }
}

impl From<TransportError> for TranslateError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => TranslateError::Timeout,
            TransportError::Connection(message) => TranslateError::Network(message),
        }
    }
}
