use thiserror::Error;

use crate::{types::NodeKind, warning::WarningStatusCode};

/// Failure while turning JSON into typed card objects.
///
/// Errors returned by a single element or action parser are recovered by
/// [`ParseContext`](crate::ParseContext): the node is skipped and a warning is
/// recorded. Only [fatal](ParseError::is_fatal) errors abort the document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object for {what}")]
    ExpectedObject { what: String },
    #[error("document type is `{found}`, expected `AdaptiveCard`")]
    NotAnAdaptiveCard { found: String },
    #[error("`{type_name}` is missing required property `{property}`")]
    RequiredPropertyMissing { type_name: String, property: String },
    #[error("`{type_name}` has an invalid `{property}`: {reason}")]
    InvalidValue {
        type_name: String,
        property: String,
        reason: String,
    },
    #[error("no parser registered for {kind} type `{type_name}`")]
    UnknownType { kind: NodeKind, type_name: String },
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    pub fn missing(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        ParseError::RequiredPropertyMissing {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    pub fn invalid(
        type_name: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ParseError::InvalidValue {
            type_name: type_name.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the whole document instead of skipping one node.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::Json(_)
                | ParseError::NotAnAdaptiveCard { .. }
                | ParseError::UnknownType { .. }
        )
    }

    /// Warning code recorded when this error causes a node to be skipped.
    pub fn warning_code(&self) -> WarningStatusCode {
        match self {
            ParseError::RequiredPropertyMissing { .. } => {
                WarningStatusCode::RequiredPropertyMissing
            }
            ParseError::InvalidValue { .. } | ParseError::ExpectedObject { .. } => {
                WarningStatusCode::InvalidValue
            }
            ParseError::UnknownType {
                kind: NodeKind::Action,
                ..
            } => WarningStatusCode::UnknownActionElementType,
            ParseError::UnknownType { .. } => WarningStatusCode::UnknownElementType,
            ParseError::Json(_) | ParseError::NotAnAdaptiveCard { .. } | ParseError::Custom(_) => {
                WarningStatusCode::CustomWarning
            }
        }
    }
}

impl From<String> for ParseError {
    fn from(value: String) -> Self {
        ParseError::Custom(value)
    }
}

impl From<&str> for ParseError {
    fn from(value: &str) -> Self {
        ParseError::Custom(value.to_string())
    }
}
