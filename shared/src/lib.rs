// shared/src/lib.rs

/// Error taxonomy shared by every repository in the workspace.
///
/// `Persistence` is reserved for local cache/storage faults; the read-through
/// path absorbs it as a miss instead of failing the fetch. The causal error
/// is logged at the translation site and carried here as display text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("unauthorised")]
    Unauthorised,
    #[error("persistence: {0}")]
    Persistence(String),
    #[error("unknown: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
