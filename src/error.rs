use std::fmt;

/// Universal error type for vector conversion operations.
///
/// The interpreter and parser themselves never fail: malformed input
/// degrades to simpler geometry or is skipped. Errors only arise at the
/// boundary to the upstream collaborator (fetching an operator list) and
/// are propagated unchanged to the caller.
///
/// The type is `Clone` so the conversion cache can memoize a failed
/// conversion and replay it for later requests with the same key.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorError {
    /// The upstream page collaborator failed to supply an operator list.
    Source(String),

    /// Generic error with message
    Generic(String),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::Source(msg) => {
                write!(f, "Upstream source error: {}", msg)
            }
            VectorError::Generic(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for VectorError {}

/// Result type alias for vector conversion operations
pub type VectorResult<T> = Result<T, VectorError>;
