use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use duet_types::Credential;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::transport::{HttpResponse, ReqwestTransport, Transport};
use crate::{ProviderMetadata, TranslateError, Translation, TranslationRequest, Translator};

const PROVIDER: &str = "deepl";

/// DeepL client. Owns one transport session and the API key until
/// [`DeepLClient::destroy`] is called or the client is dropped.
pub struct DeepLClient {
    api_url: String,
    credential: Mutex<Credential>,
    transport: Mutex<Option<Arc<dyn Transport>>>,
    /// Cancelled on teardown, aborting every in-flight request
    session: CancellationToken,
}

impl DeepLClient {
    pub fn new(
        credential: Credential,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(credential, api_url, Arc::new(transport)))
    }

    pub fn with_transport(
        credential: Credential,
        api_url: String,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            api_url,
            credential: Mutex::new(credential),
            transport: Mutex::new(Some(transport)),
            session: CancellationToken::new(),
        }
    }

    /// Abort in-flight requests, release the transport and wipe the key.
    /// Safe to call more than once.
    pub fn destroy(&self) {
        if self.session.is_cancelled() {
            return;
        }

        self.session.cancel();
        lock(&self.transport).take();
        lock(&self.credential).wipe();

        tracing::debug!("DeepL client torn down");
    }

    pub fn is_destroyed(&self) -> bool {
        self.session.is_cancelled()
    }
}

#[async_trait]
impl Translator for DeepLClient {
    async fn translate(
        &self,
        text: &str,
        from: Option<&str>,
        to: &str,
        cancel: &CancellationToken,
    ) -> Result<Translation, TranslateError> {
        let credential = lock(&self.credential).clone();
        if credential.is_empty() {
            return Err(TranslateError::MissingCredential);
        }

        let request = TranslationRequest::new(text, from, to)?;

        if cancel.is_cancelled() || self.session.is_cancelled() {
            return Err(TranslateError::Cancelled);
        }

        let Some(transport) = lock(&self.transport).clone() else {
            return Err(TranslateError::Cancelled);
        };

        let form = request.form(credential.expose());
        drop(credential);

        tracing::debug!(
            "Translating {} chars: {} -> {}",
            request.text.chars().count(),
            request.source.map_or("auto", |lang| lang.as_str()),
            request.target
        );

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Translation cancelled by caller");
                return Err(TranslateError::Cancelled);
            }
            _ = self.session.cancelled() => {
                tracing::debug!("Translation aborted by client teardown");
                return Err(TranslateError::Cancelled);
            }
            result = transport.post_form(&self.api_url, form.fields()) => result?,
        };

        drop(form);

        parse_response(&request, response)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

impl Drop for DeepLClient {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for DeepLClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLClient")
            .field("api_url", &self.api_url)
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    text: String,
    detected_source_language: Option<String>,
}

#[derive(Deserialize)]
struct DeepLErrorBody {
    message: Option<String>,
}

pub(crate) fn parse_response(
    request: &TranslationRequest,
    response: HttpResponse,
) -> Result<Translation, TranslateError> {
    if !(200..300).contains(&response.status) {
        tracing::warn!("DeepL returned HTTP {}", response.status);
        return Err(classify_status(response));
    }

    let parsed: DeepLResponse = serde_json::from_str(&response.body)
        .map_err(|e| TranslateError::ResponseParseError(e.to_string()))?;

    let Some(first) = parsed.translations.into_iter().next() else {
        return Err(TranslateError::EmptyResponse);
    };

    let detected_source_lang = if request.is_auto_detect() {
        first.detected_source_language
    } else {
        None
    };

    Ok(Translation {
        text: first.text,
        detected_source_lang,
        to: request.target,
        provider: PROVIDER.to_string(),
    })
}

fn classify_status(response: HttpResponse) -> TranslateError {
    match response.status {
        403 => TranslateError::AuthFailure {
            message: remote_message(&response.body),
        },
        456 => TranslateError::QuotaExceeded {
            message: remote_message(&response.body),
        },
        400 => TranslateError::BadRequest {
            message: remote_message(&response.body),
        },
        status => TranslateError::RemoteError {
            status,
            body: response.body,
        },
    }
}

/// `message` field of a DeepL error body, if the body has that shape
fn remote_message(body: &str) -> Option<String> {
    serde_json::from_str::<DeepLErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
