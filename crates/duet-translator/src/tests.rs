use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use duet_types::{Credential, LanguageCode};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::{DeepLClient, HttpResponse, TranslateError, Transport, TransportError, Translator};

const API_URL: &str = "https://api.test/v2/translate";

enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    Hang,
}

/// In-memory transport: replays scripted replies and records each request
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Vec<(&'static str, String)>>>,
}

impl ScriptedTransport {
    fn replying(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        })
    }

    fn ok(body: &str) -> Arc<Self> {
        Self::replying(vec![Reply::Respond(HttpResponse {
            status: 200,
            body: body.to_string(),
        })])
    }

    fn status(status: u16, body: &str) -> Arc<Self> {
        Self::replying(vec![Reply::Respond(HttpResponse {
            status,
            body: body.to_string(),
        })])
    }

    fn hanging() -> Arc<Self> {
        Self::replying(vec![Reply::Hang])
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_form(&self) -> Vec<(&'static str, String)> {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse, TransportError> {
        assert_eq!(url, API_URL);
        self.requests.lock().unwrap().push(form.to_vec());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");

        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(err) => Err(err),
            Reply::Hang => std::future::pending().await,
        }
    }
}

fn client(transport: Arc<ScriptedTransport>) -> DeepLClient {
    client_with_key("test-key:fx", transport)
}

fn client_with_key(key: &str, transport: Arc<ScriptedTransport>) -> DeepLClient {
    DeepLClient::with_transport(Credential::new(key), API_URL.to_string(), transport)
}

#[tokio::test]
async fn returns_translation_text_verbatim() {
    let transport = ScriptedTransport::ok(
        r#"{"translations":[{"detected_source_language":"EN","text":"  Hola,\n mundo!  "}]}"#,
    );
    let client = client(transport.clone());

    let translation = client
        .translate("Hello, world!", None, "ES", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(translation.text, "  Hola,\n mundo!  ");
    assert_eq!(translation.detected_source_lang.as_deref(), Some("EN"));
    assert_eq!(translation.to, LanguageCode::Es);
    assert_eq!(translation.provider, "deepl");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn auto_detect_request_has_no_source_field() {
    let transport = ScriptedTransport::ok(r#"{"translations":[{"text":"Hola"}]}"#);
    let client = client(transport.clone());

    client
        .translate("  Hello \n", None, "ES", &CancellationToken::new())
        .await
        .unwrap();

    let form = transport.last_form();
    assert_eq!(
        form,
        vec![
            ("auth_key", "test-key:fx".to_string()),
            ("text", "Hello".to_string()),
            ("target_lang", "ES".to_string()),
        ]
    );
}

#[tokio::test]
async fn explicit_source_is_sent_and_detection_is_not_reported() {
    let transport =
        ScriptedTransport::ok(r#"{"translations":[{"detected_source_language":"DE","text":"Hi"}]}"#);
    let client = client(transport.clone());

    let translation = client
        .translate("Hallo", Some("DE"), "EN", &CancellationToken::new())
        .await
        .unwrap();

    assert!(transport.last_form().contains(&("source_lang", "DE".to_string())));
    assert_eq!(translation.detected_source_lang, None);
}

#[tokio::test]
async fn missing_detection_field_is_none() {
    let transport = ScriptedTransport::ok(r#"{"translations":[{"text":"Hola"}]}"#);
    let client = client(transport);

    let translation = client
        .translate("Hello", None, "ES", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(translation.detected_source_lang, None);
}

#[tokio::test]
async fn invalid_languages_never_reach_the_network() {
    let transport = ScriptedTransport::replying(vec![]);
    let client = client(transport.clone());
    let cancel = CancellationToken::new();

    for code in ["", "XX", "en", "PT", "pt-BR", "EN "] {
        let err = client.translate("Hello", None, code, &cancel).await.unwrap_err();
        assert_eq!(err, TranslateError::InvalidLanguage(code.to_string()));

        let err = client
            .translate("Hello", Some(code), "EN", &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, TranslateError::InvalidLanguage(code.to_string()));
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn blank_text_never_reaches_the_network() {
    let transport = ScriptedTransport::replying(vec![]);
    let client = client(transport.clone());
    let cancel = CancellationToken::new();

    for text in ["", "   ", "\n\t \r\n"] {
        let err = client.translate(text, None, "EN", &cancel).await.unwrap_err();
        assert_eq!(err, TranslateError::EmptyInput);
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn missing_credential_is_checked_first() {
    let transport = ScriptedTransport::replying(vec![]);
    let client = client_with_key("", transport.clone());

    let err = client
        .translate("", None, "XX", &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, TranslateError::MissingCredential);
    assert!(err.is_configuration_problem());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn http_statuses_are_classified() {
    let cases = [
        (
            403,
            r#"{"message":"Wrong endpoint"}"#,
            TranslateError::AuthFailure {
                message: Some("Wrong endpoint".to_string()),
            },
        ),
        (
            400,
            r#"{"message":"Value for 'target_lang' not supported."}"#,
            TranslateError::BadRequest {
                message: Some("Value for 'target_lang' not supported.".to_string()),
            },
        ),
        (
            503,
            "Service Unavailable",
            TranslateError::RemoteError {
                status: 503,
                body: "Service Unavailable".to_string(),
            },
        ),
        (
            429,
            "",
            TranslateError::RemoteError {
                status: 429,
                body: String::new(),
            },
        ),
    ];

    for (status, body, expected) in cases {
        let client = client(ScriptedTransport::status(status, body));
        let err = client
            .translate("Hello", None, "ES", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, expected, "status {status}");
    }
}

#[tokio::test]
async fn quota_exceeded_regardless_of_body() {
    for body in ["", "not json", r#"{"translations":[{"text":"Hola"}]}"#, r#"{"message":"Quota"}"#] {
        let client = client(ScriptedTransport::status(456, body));
        let err = client
            .translate("Hello", None, "ES", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(
            matches!(err, TranslateError::QuotaExceeded { .. }),
            "body {body:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn empty_and_malformed_bodies() {
    let client_empty = client(ScriptedTransport::ok(r#"{"translations":[]}"#));
    let err = client_empty
        .translate("Hello", None, "ES", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err, TranslateError::EmptyResponse);

    let client_missing = client(ScriptedTransport::ok("{}"));
    let err = client_missing
        .translate("Hello", None, "ES", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err, TranslateError::EmptyResponse);

    let client_broken = client(ScriptedTransport::ok("<html>oops</html>"));
    let err = client_broken
        .translate("Hello", None, "ES", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::ResponseParseError(_)));
    assert_eq!(err.user_message().as_deref(), Some("Translation failed."));
}

#[tokio::test]
async fn transport_failures_map_to_timeout_and_network() {
    let transport = ScriptedTransport::replying(vec![
        Reply::Fail(TransportError::Timeout),
        Reply::Fail(TransportError::Connection("connection refused".to_string())),
    ]);
    let client = client(transport);
    let cancel = CancellationToken::new();

    let err = client.translate("Hello", None, "ES", &cancel).await.unwrap_err();
    assert_eq!(err, TranslateError::Timeout);

    let err = client.translate("Hello", None, "ES", &cancel).await.unwrap_err();
    assert_eq!(err, TranslateError::Network("connection refused".to_string()));
}

#[tokio::test]
async fn cancelling_in_flight_request_resolves_cancelled() {
    let transport = ScriptedTransport::hanging();
    let client = client(transport.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = timeout(
        Duration::from_secs(2),
        client.translate("Hello", None, "ES", &cancel),
    )
    .await
    .expect("translate hung after cancellation");

    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.user_message(), None);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn already_cancelled_token_skips_the_network() {
    let transport = ScriptedTransport::replying(vec![]);
    let client = client(transport.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.translate("Hello", None, "ES", &cancel).await.unwrap_err();

    assert_eq!(err, TranslateError::Cancelled);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn destroy_aborts_in_flight_request() {
    let transport = ScriptedTransport::hanging();
    let client = Arc::new(client(transport));

    let pending = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .translate("Hello", None, "ES", &CancellationToken::new())
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    client.destroy();

    let result = timeout(Duration::from_secs(2), pending)
        .await
        .expect("translate hung after destroy")
        .unwrap();
    assert_eq!(result.unwrap_err(), TranslateError::Cancelled);
}

#[tokio::test]
async fn destroy_is_idempotent_and_forgets_the_key() {
    let transport = ScriptedTransport::replying(vec![]);
    let client = client(transport.clone());

    client.destroy();
    client.destroy();
    assert!(client.is_destroyed());

    let err = client
        .translate("Hello", None, "ES", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err, TranslateError::MissingCredential);
    assert_eq!(transport.calls(), 0);

    assert!(!format!("{client:?}").contains("test-key"));
}
