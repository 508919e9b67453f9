use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Connection(String),
}

/// HTTP seam under the translation client.
///
/// Any non-2xx status is still a successful transport round trip; only
/// failures to get a response at all are `TransportError`s.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        // reqwest errors carry the url, never the form body
        TransportError::Connection(err.to_string())
    }
}
