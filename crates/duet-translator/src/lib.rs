mod deepl;
mod error;
mod request;
mod transport;

#[cfg(test)]
mod tests;

pub use deepl::DeepLClient;
pub use error::TranslateError;
pub use request::TranslationRequest;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};

use duet_types::LanguageCode;
use tokio_util::sync::CancellationToken;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `to`.
    ///
    /// `from: None` asks the service to detect the source language; the
    /// detected code is then reported in [`Translation::detected_source_lang`].
    /// Codes are checked against [`LanguageCode`] before any I/O.
    async fn translate(
        &self,
        text: &str,
        from: Option<&str>,
        to: &str,
        cancel: &CancellationToken,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated text, verbatim from the provider
    pub text: String,
    /// Only set for auto-detect requests
    pub detected_source_lang: Option<String>,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}
