use card_object_model::{ParseError, WarningStatusCode};
use thiserror::Error;

use crate::config::HostConfigError;

/// Failure of a renderer, or of a card-level step around rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    HostConfig(#[from] HostConfigError),
    #[error("renderer for `{expected}` was given a `{found}` element")]
    UnexpectedElement { expected: String, found: String },
    #[error("`{type_name}` needs interactivity, which the host does not support")]
    InteractivityNotSupported { type_name: String },
    #[error("asset `{url}` could not be loaded: {reason}")]
    AssetLoadFailed { url: String, reason: String },
    #[error("{0}")]
    Custom(String),
}

impl RenderError {
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        RenderError::UnexpectedElement {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Status code of the warning recorded when this error skips an element.
    pub fn warning_code(&self) -> WarningStatusCode {
        match self {
            RenderError::Parse(err) => err.warning_code(),
            RenderError::InteractivityNotSupported { .. } => {
                WarningStatusCode::InteractivityNotSupported
            }
            RenderError::AssetLoadFailed { .. } => WarningStatusCode::AssetLoadFailed,
            RenderError::HostConfig(_)
            | RenderError::UnexpectedElement { .. }
            | RenderError::Custom(_) => WarningStatusCode::RenderFailed,
        }
    }
}

impl From<String> for RenderError {
    fn from(value: String) -> Self {
        RenderError::Custom(value)
    }
}

impl From<&str> for RenderError {
    fn from(value: &str) -> Self {
        RenderError::Custom(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_warning_codes() {
        let err = RenderError::InteractivityNotSupported {
            type_name: "Input.Text".into(),
        };
        assert_eq!(err.warning_code(), WarningStatusCode::InteractivityNotSupported);
        assert_eq!(
            RenderError::from("boom").warning_code(),
            WarningStatusCode::RenderFailed
        );
        assert_eq!(
            RenderError::unexpected("Image", "TextBlock").to_string(),
            "renderer for `Image` was given a `TextBlock` element"
        );
    }
}
