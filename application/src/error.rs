use shared::Error;
use thiserror::Error as ThisError;

/// Error vocabulary surfaced to the presentation layer. Smaller than the
/// repository taxonomy: cache faults never reach this level, and everything
/// diagnostic collapses into `Unexpected`.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    #[error("content unavailable")]
    Unavailable,
    #[error("sign-in required")]
    Unauthorised,
    #[error("something went wrong: {0}")]
    Unexpected(String),
}

impl From<Error> for UseCaseError {
    fn from(error: Error) -> Self {
        match error {
            Error::NotFound => UseCaseError::Unavailable,
            Error::Unauthorised => UseCaseError::Unauthorised,
            Error::Persistence(detail) | Error::Unknown(detail) => {
                UseCaseError::Unexpected(detail)
            }
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
