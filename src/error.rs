use thiserror::Error;

/// Errors surfaced by store operations.
///
/// The store never retries and never logs on its own; every failure is
/// returned to the immediate caller, which decides how to present it.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before touching storage: empty required text, a
    /// rating outside 1-5, or a fixture reference that cannot resolve.
    #[error("{0}")]
    Validation(String),

    /// The addressed id is absent from its collection.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The storage layer could not complete the call.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
