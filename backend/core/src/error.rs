use thiserror::Error;

/// Errors raised while building matcher components from configuration.
///
/// Matching itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlateError {
    #[error("invalid token length range {min}..={max}: need 1 <= min <= max")]
    InvalidTokenRange { min: usize, max: usize },

    #[error("invalid pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for PlateError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
