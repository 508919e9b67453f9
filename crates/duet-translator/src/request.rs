use duet_types::{LanguageCode, wipe_string};

use crate::TranslateError;

/// A validated translate call: trimmed non-empty text and known codes.
/// `source: None` means auto-detect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Option<LanguageCode>,
    pub target: LanguageCode,
}

impl TranslationRequest {
    /// Checks target, then source, then text.
    pub fn new(text: &str, from: Option<&str>, to: &str) -> Result<Self, TranslateError> {
        let target = parse_language(to)?;
        let source = from.map(parse_language).transpose()?;

        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        Ok(Self {
            text: text.to_string(),
            source,
            target,
        })
    }

    pub fn is_auto_detect(&self) -> bool {
        self.source.is_none()
    }

    /// Form fields for the DeepL endpoint. `source_lang` is left out for
    /// auto-detect, which is how the API is asked to detect.
    pub fn form(&self, auth_key: &str) -> Form {
        let mut fields = vec![
            (AUTH_KEY_FIELD, auth_key.to_string()),
            ("text", self.text.clone()),
        ];

        if let Some(source) = self.source {
            fields.push(("source_lang", source.as_str().to_string()));
        }

        fields.push(("target_lang", self.target.as_str().to_string()));
        Form { fields }
    }
}

const AUTH_KEY_FIELD: &str = "auth_key";

/// Encoded request body. Holds a copy of the API key, which is wiped when
/// the form is dropped.
pub struct Form {
    fields: Vec<(&'static str, String)>,
}

impl Form {
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn wipe_secrets(&mut self) {
        self.fields
            .iter_mut()
            .filter(|(name, _)| *name == AUTH_KEY_FIELD)
            .for_each(|(_, value)| wipe_string(value));
    }
}

impl Drop for Form {
    fn drop(&mut self) {
        self.wipe_secrets();
    }
}

fn parse_language(code: &str) -> Result<LanguageCode, TranslateError> {
    code.parse()
        .map_err(|_| TranslateError::InvalidLanguage(code.to_string()))
}
