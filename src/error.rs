//! Crate-wide error type.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors surfaced by the NLB compatibility filter and its host.
///
/// Header content never produces an error: malformed forwarding headers are
/// handled best-effort by the resolvers.
#[derive(Debug, Error)]
pub enum NlbError {
    /// A required argument was not supplied (e.g. no request context).
    #[error("invalid argument: {0} must not be missing")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = NlbError> = std::result::Result<T, E>;
