//! Liveboard parse errors.
//!
//! Callers see a single [`ParseError`] for any malformed payload. The
//! underlying problem is kept as its `source()`: either the JSON error from
//! serde, or the list of field-level [`DecodeIssue`]s found during
//! conversion.

use std::fmt;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueKind {
    /// Field absent or `null`
    #[error("missing field")]
    Missing,

    /// Field present with a JSON type that cannot be coerced
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// Numeric field whose text is not a number (strict mode only)
    #[error("not a number: {value:?}")]
    NotANumber { value: String },
}

/// A problem with one field, located by its path in the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct DecodeIssue {
    /// Dotted path, e.g. `departures.departure[1].platforminfo.normal`.
    pub path: String,
    pub kind: IssueKind,
}

/// Every issue found while converting one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeIssues(Vec<DecodeIssue>);

impl DecodeIssues {
    pub(crate) fn new(issues: Vec<DecodeIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self(issues))
        }
    }

    pub fn as_slice(&self) -> &[DecodeIssue] {
        &self.0
    }
}

impl fmt::Display for DecodeIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            1 => write!(f, "1 field failed to decode"),
            n => write!(f, "{n} fields failed to decode"),
        }
    }
}

impl std::error::Error for DecodeIssues {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// The low-level failure behind a [`ParseError`].
#[derive(Debug, thiserror::Error)]
pub enum ParseCause {
    /// Payload is not JSON, or not a JSON object
    #[error("malformed JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Payload is JSON but fields are missing or unusable
    #[error(transparent)]
    Shape(DecodeIssues),
}

/// The one error the liveboard parser returns.
#[derive(Debug, thiserror::Error)]
#[error("Liveboard api data is in an unexpected format.")]
pub struct ParseError {
    #[source]
    cause: ParseCause,
}

impl ParseError {
    pub fn cause(&self) -> &ParseCause {
        &self.cause
    }

    /// Field-level issues. Empty when the cause is a JSON error.
    pub fn issues(&self) -> &[DecodeIssue] {
        match &self.cause {
            ParseCause::Shape(issues) => issues.as_slice(),
            ParseCause::Json(_) => &[],
        }
    }

    /// Human-readable description of every underlying problem.
    pub fn details(&self) -> Vec<String> {
        match &self.cause {
            ParseCause::Shape(issues) => issues
                .as_slice()
                .iter()
                .map(ToString::to_string)
                .collect(),
            ParseCause::Json(e) => vec![e.to_string()],
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            cause: ParseCause::Json(err),
        }
    }
}

impl From<DecodeIssues> for ParseError {
    fn from(issues: DecodeIssues) -> Self {
        Self {
            cause: ParseCause::Shape(issues),
        }
    }
}
