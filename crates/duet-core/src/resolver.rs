use duet_translator::{TranslateError, Translator};
use duet_types::{LanguageCode, ResolvedTranslation, TranslationMode};
use tokio_util::sync::CancellationToken;

/// Pick the translation direction for `text`.
///
/// First asks for `secondary` with auto-detect. If the service reports a
/// source language other than `main`, the text was foreign and a second call
/// translates it into `main` instead. An unknown source counts as `main`.
/// Errors from either call are returned as is.
pub async fn resolve<T>(
    translator: &T,
    text: &str,
    main: LanguageCode,
    secondary: LanguageCode,
    cancel: &CancellationToken,
) -> Result<ResolvedTranslation, TranslateError>
where
    T: Translator + ?Sized,
{
    let first = translator
        .translate(text, None, secondary.as_str(), cancel)
        .await?;

    let detected = first.detected_source_lang.clone();

    match detected.as_deref() {
        Some(detected) if detected != main.as_str() => {
            tracing::debug!("Detected {detected}, translating into main language {main}");

            let second = translator
                .translate(text, None, main.as_str(), cancel)
                .await?;

            Ok(ResolvedTranslation {
                text: second.text,
                mode: TranslationMode::Main,
                target: main,
                detected_source_lang: second
                    .detected_source_lang
                    .or(first.detected_source_lang),
            })
        }
        detected => {
            tracing::debug!(
                "Detected {}, keeping translation into {secondary}",
                detected.unwrap_or("nothing")
            );

            Ok(ResolvedTranslation {
                text: first.text,
                mode: TranslationMode::Secondary,
                target: secondary,
                detected_source_lang: first.detected_source_lang,
            })
        }
    }
}
