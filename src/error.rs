//! Error types for header configuration and layout.
//!
//! Every error is raised while a header is being configured or mounted.
//! Scrolling never produces an error.

use thiserror::Error;

/// Invalid header configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Direction other than `ltr` / `rtl`.
    #[error("unknown layout direction '{value}' (expected 'ltr' or 'rtl')")]
    UnknownDirection { value: String },

    /// Collapse distance must be a finite value greater than zero.
    #[error("collapse distance must be positive, got {distance}")]
    NonPositiveCollapseDistance { distance: f32 },

    #[error("invalid color '{value}' for {field}")]
    InvalidColor { field: &'static str, value: String },

    #[error("font size for {field} must be positive, got {size}")]
    InvalidFontSize { field: &'static str, size: f32 },

    #[error("invalid font weight '{value}'")]
    InvalidFontWeight { value: String },

    #[error("invalid text alignment '{value}'")]
    InvalidAlignment { value: String },

    /// No title text at any configuration level.
    #[error("header title is missing")]
    MissingTitle,

    /// Option bag could not be deserialized.
    #[error("failed to parse header options: {message}")]
    Parse { message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse { message: err.to_string() }
    }
}

/// The header cannot be laid out with the supplied geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Header width must be a finite value greater than zero.
    #[error("header width must be positive, got {width}")]
    NonPositiveWidth { width: f32 },

    /// The text measurer returned a box that cannot be rendered.
    #[error("cannot resolve metrics for '{text}': {reason}")]
    UnresolvableMetrics { text: String, reason: String },

    /// Flexbox computation of the compact bar failed.
    #[error("bar layout failed: {message}")]
    Engine { message: String },
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Engine { message: err.to_string() }
    }
}

/// Any error surfaced to the mounting host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeaderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::UnknownDirection { value: "auto".into() };
        assert_eq!(
            err.to_string(),
            "unknown layout direction 'auto' (expected 'ltr' or 'rtl')"
        );

        let err = LayoutError::NonPositiveWidth { width: 0.0 };
        assert_eq!(err.to_string(), "header width must be positive, got 0");
    }

    #[test]
    fn test_header_error_is_transparent() {
        let err: HeaderError = ConfigError::MissingTitle.into();
        assert_eq!(err.to_string(), "header title is missing");
        assert!(matches!(err, HeaderError::Config(ConfigError::MissingTitle)));
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::Parse { .. }));
    }
}
