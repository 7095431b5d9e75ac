use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a non-fatal problem found while parsing or rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningStatusCode {
    AssetLoadFailed,
    UnknownElementType,
    UnknownActionElementType,
    UnknownEnumValue,
    NoRendererForType,
    InteractivityNotSupported,
    MaxActionsExceeded,
    UnsupportedSchemaVersion,
    RequiredPropertyMissing,
    InvalidValue,
    RenderFailed,
    CustomWarning,
}

/// Warning collected during parsing or rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardWarning {
    pub status_code: WarningStatusCode,
    pub message: String,
    /// JSON pointer of the offending node, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CardWarning {
    pub fn new(status_code: WarningStatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for CardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.status_code, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}
