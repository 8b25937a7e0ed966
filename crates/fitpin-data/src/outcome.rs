//! Tri-state result of loading a resource.

use crate::FetchError;

/// What a screen got back when it asked for data.
///
/// `Empty` covers a `404` and an empty or `null` body, which the backend
/// uses for "nothing stored yet".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Empty,
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    pub fn from_result(result: Result<Option<T>, FetchError>) -> Self {
        match result {
            Ok(Some(value)) => FetchOutcome::Loaded(value),
            Ok(None) => FetchOutcome::Empty,
            Err(e) if e.is_not_found() => FetchOutcome::Empty,
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Loaded(value) => FetchOutcome::Loaded(f(value)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(e) => FetchOutcome::Failed(e),
        }
    }

    /// `Loaded` becomes `Ok(Some)`, `Empty` becomes `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, FetchError> {
        match self {
            FetchOutcome::Loaded(value) => Ok(Some(value)),
            FetchOutcome::Empty => Ok(None),
            FetchOutcome::Failed(e) => Err(e),
        }
    }
}
