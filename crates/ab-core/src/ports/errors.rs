use thiserror::Error;

/// Failure reported by a record store adapter.
///
/// The core never retries; a failed operation is terminal and the user
/// re-invokes the same action to try again.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The request never produced a store response (network, timeout).
    #[error("store unreachable: {0}")]
    Transport(String),

    /// The store answered and refused the request.
    #[error("store rejected the request: {0}")]
    Rejected(String),
}
