//! Error types for markup conventions, selectors, and document snapshots.
//!
//! Click handling itself never fails: unresolved controls degrade to a no-op.
//! These errors cover the configuration and tooling surfaces around it.

use thiserror::Error;

/// Result alias for menu library operations.
pub type MenuResult<T> = Result<T, MenuError>;

/// Failure loading markup conventions.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Markup conventions failed validation.
    #[error(transparent)]
    Markup(#[from] MarkupError),
    /// Markup conventions could not be decoded from JSON.
    #[error("failed to decode menu markup")]
    MarkupDecode {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Invalid field in a [`crate::MenuMarkup`] document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Field was empty or whitespace.
    #[error("markup field '{field}' must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Field must hold a single class or attribute name.
    #[error("markup field '{field}' must be a single name, got '{value}'")]
    InvalidName {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// Field must hold a selector the controller can evaluate.
    #[error("markup field '{field}' holds an invalid selector")]
    InvalidSelector {
        /// Name of the offending field.
        field: &'static str,
        /// Parse failure reported by the selector engine.
        #[source]
        source: SelectorError,
    },
}

/// Selector syntax rejected by the in-memory selector engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Selector (or one of its comma-separated groups) was empty.
    #[error("selector is empty")]
    Empty,
    /// Selector used syntax outside the supported subset.
    #[error("unsupported selector '{selector}': {reason}")]
    Unsupported {
        /// Full selector text.
        selector: String,
        /// Short description of the problem.
        reason: &'static str,
    },
}

impl SelectorError {
    pub(crate) fn unsupported(selector: &str, reason: &'static str) -> Self {
        Self::Unsupported {
            selector: selector.to_string(),
            reason,
        }
    }
}

/// Failure reading or writing a JSON document snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot JSON could not be decoded.
    #[error("failed to decode document snapshot")]
    Decode {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Snapshot could not be rendered as JSON.
    #[error("failed to encode document snapshot")]
    Encode {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A node in the snapshot had an empty tag name.
    #[error("snapshot node at '{path}' has an empty tag name")]
    EmptyTag {
        /// Slash-separated child index path to the node.
        path: String,
    },
}
