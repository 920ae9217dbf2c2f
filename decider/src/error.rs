//! Error types for Decider.
//!
//! Each module owns its own error enum. [`DeciderError`] joins the two that
//! can stop a decision, so [`Selector::decide`](crate::selector::Selector::decide)
//! reports either through one type. Configuration and history keep their own
//! errors ([`ConfigError`](crate::config::ConfigError),
//! [`HistoryError`](crate::history::HistoryError)).

use thiserror::Error;

use crate::selector::SelectionError;
use crate::types::ValidationError;

/// Errors that can occur while deciding on a list.
///
/// # Examples
///
/// ```
/// use decider::error::DeciderError;
/// use decider::parser::parse_list;
///
/// fn check(text: &str) -> Result<usize, DeciderError> {
///     let list = parse_list(text);
///     list.validate()?;
///     Ok(list.len())
/// }
///
/// assert!(check("Pizza\nSushi").is_ok());
/// assert!(matches!(check(""), Err(DeciderError::Validation(_))));
/// ```
#[derive(Error, Debug)]
pub enum DeciderError {
    /// The parsed list cannot be decided on.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A pick was attempted on an empty list.
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
}

impl DeciderError {
    /// Returns `true` for failures caused by the user's list rather than a
    /// selection bug.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, DeciderError::Validation(_))
    }
}

/// A specialized `Result` type for Decider operations.
pub type Result<T> = std::result::Result<T, DeciderError>;
