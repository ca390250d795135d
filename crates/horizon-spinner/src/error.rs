//! Error types for the spinner crate.

/// Result type alias for spinner operations.
pub type Result<T> = std::result::Result<T, SpinnerError>;

/// Errors raised by spin models, formatters and editors.
///
/// Stepping past a bound is not an error: [`next_value`] and
/// [`previous_value`] return `None` instead.
///
/// [`next_value`]: crate::DateTimeSpinModel::next_value
/// [`previous_value`]: crate::DateTimeSpinModel::previous_value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinnerError {
    /// A required input was missing or violated the model's bounds.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Text matched neither the full date-time nor the date-only form.
    #[error("could not parse '{text}' at offset {offset}: {message}")]
    Parse {
        text: String,
        message: String,
        /// Character offset at which parsing stopped matching.
        offset: usize,
    },

    /// The display pattern could not be compiled.
    #[error("invalid display pattern '{pattern}' at offset {offset}: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        offset: usize,
    },

    /// Configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SpinnerError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a parse error.
    pub fn parse(text: impl Into<String>, message: impl Into<String>, offset: usize) -> Self {
        Self::Parse {
            text: text.into(),
            message: message.into(),
            offset,
        }
    }

    /// Create a pattern error.
    pub fn invalid_pattern(
        pattern: impl Into<String>,
        message: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
            offset,
        }
    }

    /// Character offset carried by parse and pattern errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Parse { offset, .. } | Self::InvalidPattern { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Whether this is a text parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Whether this is an invalid-argument failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<toml::de::Error> for SpinnerError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
