//! Display language for the board and its localized strings.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0:?} (expected en, nl, fr or de)")]
pub struct UnknownLanguage(pub String);

/// Languages the board can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Nl,
    Fr,
    De,
}

/// Strings shown on the board, per language.
#[derive(Debug, PartialEq, Eq)]
pub struct LocalizedStrings {
    /// Notice under a canceled departure.
    pub canceled_notice: &'static str,
}

const EN: LocalizedStrings = LocalizedStrings {
    canceled_notice: "Doesn't run today",
};

const NL: LocalizedStrings = LocalizedStrings {
    canceled_notice: "Rijdt vandaag niet",
};

const FR: LocalizedStrings = LocalizedStrings {
    canceled_notice: "Ne roule pas aujourd'hui",
};

const DE: LocalizedStrings = LocalizedStrings {
    canceled_notice: "Heute nicht fahren",
};

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Nl, Language::Fr, Language::De];

    /// Two-letter code, also used as the HTML `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    pub fn strings(self) -> &'static LocalizedStrings {
        match self {
            Language::En => &EN,
            Language::Nl => &NL,
            Language::Fr => &FR,
            Language::De => &DE,
        }
    }

    /// Parse a language code, falling back to English for anything unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use liveboard_server::domain::Language;
    ///
    /// assert_eq!(Language::from_code_or_default("fr"), Language::Fr);
    /// assert_eq!(Language::from_code_or_default("pt"), Language::En);
    /// ```
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_else(|e: UnknownLanguage| {
            tracing::warn!("{e}, falling back to {}", Language::default());
            Language::default()
        })
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "nl" => Ok(Language::Nl),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
