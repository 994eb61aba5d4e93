use thiserror::Error;

/// Errors reported by [`Tree`][crate::Tree] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No element in the tree compares equal to the one that was asked for.
    #[error("element not found in tree")]
    NotFound,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
