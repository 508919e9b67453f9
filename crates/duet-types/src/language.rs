use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages accepted by the DeepL translate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    Bg,
    Cs,
    Da,
    De,
    El,
    En,
    Es,
    Et,
    Fi,
    Fr,
    Hu,
    Id,
    It,
    Ja,
    Ko,
    Lt,
    Lv,
    Nb,
    Nl,
    Pl,
    PtBr,
    PtPt,
    Ro,
    Ru,
    Sk,
    Sl,
    Sv,
    Tr,
    Uk,
    Zh,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language code: {0:?}")]
pub struct UnknownLanguage(pub String);

impl LanguageCode {
    pub const ALL: [LanguageCode; 30] = [
        LanguageCode::Bg,
        LanguageCode::Cs,
        LanguageCode::Da,
        LanguageCode::De,
        LanguageCode::El,
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Et,
        LanguageCode::Fi,
        LanguageCode::Fr,
        LanguageCode::Hu,
        LanguageCode::Id,
        LanguageCode::It,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Lt,
        LanguageCode::Lv,
        LanguageCode::Nb,
        LanguageCode::Nl,
        LanguageCode::Pl,
        LanguageCode::PtBr,
        LanguageCode::PtPt,
        LanguageCode::Ro,
        LanguageCode::Ru,
        LanguageCode::Sk,
        LanguageCode::Sl,
        LanguageCode::Sv,
        LanguageCode::Tr,
        LanguageCode::Uk,
        LanguageCode::Zh,
    ];

    /// Code as sent on the wire (`EN`, `PT-BR`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::Bg => "BG",
            LanguageCode::Cs => "CS",
            LanguageCode::Da => "DA",
            LanguageCode::De => "DE",
            LanguageCode::El => "EL",
            LanguageCode::En => "EN",
            LanguageCode::Es => "ES",
            LanguageCode::Et => "ET",
            LanguageCode::Fi => "FI",
            LanguageCode::Fr => "FR",
            LanguageCode::Hu => "HU",
            LanguageCode::Id => "ID",
            LanguageCode::It => "IT",
            LanguageCode::Ja => "JA",
            LanguageCode::Ko => "KO",
            LanguageCode::Lt => "LT",
            LanguageCode::Lv => "LV",
            LanguageCode::Nb => "NB",
            LanguageCode::Nl => "NL",
            LanguageCode::Pl => "PL",
            LanguageCode::PtBr => "PT-BR",
            LanguageCode::PtPt => "PT-PT",
            LanguageCode::Ro => "RO",
            LanguageCode::Ru => "RU",
            LanguageCode::Sk => "SK",
            LanguageCode::Sl => "SL",
            LanguageCode::Sv => "SV",
            LanguageCode::Tr => "TR",
            LanguageCode::Uk => "UK",
            LanguageCode::Zh => "ZH",
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            LanguageCode::Bg => "Bulgarian",
            LanguageCode::Cs => "Czech",
            LanguageCode::Da => "Danish",
            LanguageCode::De => "German",
            LanguageCode::El => "Greek",
            LanguageCode::En => "English",
            LanguageCode::Es => "Spanish",
            LanguageCode::Et => "Estonian",
            LanguageCode::Fi => "Finnish",
            LanguageCode::Fr => "French",
            LanguageCode::Hu => "Hungarian",
            LanguageCode::Id => "Indonesian",
            LanguageCode::It => "Italian",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Ko => "Korean",
            LanguageCode::Lt => "Lithuanian",
            LanguageCode::Lv => "Latvian",
            LanguageCode::Nb => "Norwegian",
            LanguageCode::Nl => "Dutch",
            LanguageCode::Pl => "Polish",
            LanguageCode::PtBr => "Portuguese (Brazil)",
            LanguageCode::PtPt => "Portuguese (Portugal)",
            LanguageCode::Ro => "Romanian",
            LanguageCode::Ru => "Russian",
            LanguageCode::Sk => "Slovak",
            LanguageCode::Sl => "Slovenian",
            LanguageCode::Sv => "Swedish",
            LanguageCode::Tr => "Turkish",
            LanguageCode::Uk => "Ukrainian",
            LanguageCode::Zh => "Chinese",
        }
    }

    /// Exact, case-sensitive membership check
    pub fn is_supported(code: &str) -> bool {
        code.parse::<LanguageCode>().is_ok()
    }
}

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = UnknownLanguage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(lang: LanguageCode) -> Self {
        lang.as_str().to_string()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
