// SPDX-License-Identifier: GPL-3.0-only

//! Error type shared by the color model, layout generator, design state and
//! persistence helpers.
//!
//! Most edit operations treat a missing key or an empty clipboard as a silent
//! no-op; the checked `try_*` variants on [`crate::design::DesignState`]
//! return these errors instead so that a caller can surface them.

use std::fmt;

/// Error type for keycap design operations.
#[derive(Debug)]
pub enum DesignError {
    /// A color string was not a 6-digit hex value.
    InvalidFormat {
        /// The rejected input
        input: String,
        /// Description of the accepted format
        expected: &'static str,
    },

    /// An operation referenced an id that is not in the current set.
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// Paste was attempted before any style was copied.
    EmptyClipboard,

    /// No generator table exists for the layout identifier.
    UnsupportedLayout {
        /// The unknown layout identifier
        layout: String,
        /// Optional suggestion listing supported layouts
        suggestion: Option<String>,
    },

    /// An imported snapshot was rejected.
    InvalidSnapshot {
        /// Why the snapshot was rejected
        reason: String,
    },

    /// I/O error while reading or writing a design file.
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path involved
        path: Option<String>,
    },

    /// JSON (de)serialization error.
    Json {
        /// The underlying serde_json error
        source: serde_json::Error,
        /// Line number reported by serde_json, if any
        line_number: Option<usize>,
    },
}

impl DesignError {
    /// Creates an invalid color format error.
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            expected: "6-digit hex color such as #FF5733",
        }
    }

    /// Creates a not-found error for an id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an unsupported layout error listing the supported identifiers.
    pub fn unsupported_layout(layout: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            layout: layout.into(),
            suggestion: Some("Use one of: 61-key, 87-key, 104-key".into()),
        }
    }

    /// Creates an invalid snapshot error.
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }

    /// Creates an I/O error with the file path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Creates a JSON error, capturing the reported line.
    pub fn json(source: serde_json::Error) -> Self {
        let line_number = match source.line() {
            0 => None,
            line => Some(line),
        };
        Self::Json {
            source,
            line_number,
        }
    }
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignError::InvalidFormat { input, expected } => {
                write!(f, "Invalid color format '{}': expected {}", input, expected)
            }
            DesignError::NotFound { id } => write!(f, "No item with id '{}'", id),
            DesignError::EmptyClipboard => write!(f, "No style has been copied"),
            DesignError::UnsupportedLayout { layout, suggestion } => {
                write!(f, "Unsupported keyboard layout '{}'", layout)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
                Ok(())
            }
            DesignError::InvalidSnapshot { reason } => {
                write!(f, "Invalid design snapshot: {}", reason)
            }
            DesignError::Io { source, path } => {
                write!(f, "I/O error")?;
                if let Some(path) = path {
                    write!(f, " for '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            DesignError::Json {
                source,
                line_number,
            } => {
                write!(f, "JSON error")?;
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
        }
    }
}

impl std::error::Error for DesignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DesignError::Io { source, .. } => Some(source),
            DesignError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DesignError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err)
    }
}

/// Result alias used throughout the crate.
pub type DesignResult<T> = Result<T, DesignError>;
