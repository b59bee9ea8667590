use thiserror::Error;

/// Result type used by every fallible comparison in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by orderings and the operations built on them.
///
/// Values that caused an error are carried as their `Debug` representation,
/// so the error type doesn't depend on the element type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `min_of` or `max_of` was given no elements.
    #[error("cannot find the extreme of an empty sequence")]
    Empty,

    /// An explicit ordering was asked to compare a value it doesn't rank.
    #[error("cannot compare value: {0}")]
    IncomparableValue(String),

    /// An explicit ordering was built from a list containing a value twice.
    #[error("duplicate value in explicit ordering: {0}")]
    DuplicateValue(String),
}
