//! The `{data, isLoading, error}` view of a pending query.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    /// `None` while loading and on error.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Loading => QueryState::Loading,
            Self::Ready(data) => QueryState::Ready(f(data)),
            Self::Failed(msg) => QueryState::Failed(msg),
        }
    }

    /// Combine two independent queries: loading if either is, failed if
    /// either failed (first error wins), ready only when both are.
    pub fn zip<U>(self, other: QueryState<U>) -> QueryState<(T, U)> {
        match (self, other) {
            (Self::Failed(msg), _) | (_, QueryState::Failed(msg)) => QueryState::Failed(msg),
            (Self::Ready(a), QueryState::Ready(b)) => QueryState::Ready((a, b)),
            _ => QueryState::Loading,
        }
    }
}

/// A resource's `Option<Result<..>>` (None = still loading).
impl<T, E: Display> From<Option<Result<T, E>>> for QueryState<T> {
    fn from(value: Option<Result<T, E>>) -> Self {
        match value {
            None => Self::Loading,
            Some(Ok(data)) => Self::Ready(data),
            Some(Err(e)) => Self::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_absent_while_loading_or_failed() {
        let loading: QueryState<u32> = None::<Result<u32, String>>.into();
        assert!(loading.is_loading());
        assert_eq!(loading.data(), None);

        let failed: QueryState<u32> = Some(Err::<u32, _>("network down")).into();
        assert_eq!(failed.data(), None);
        assert_eq!(failed.error(), Some("network down"));

        let ready: QueryState<u32> = Some(Ok::<_, String>(3)).into();
        assert_eq!(ready.data(), Some(&3));
    }

    #[test]
    fn test_zip() {
        let a = QueryState::Ready(1);
        let b: QueryState<&str> = QueryState::Loading;
        assert!(a.clone().zip(b).is_loading());
        let c: QueryState<&str> = QueryState::Failed("boom".into());
        assert_eq!(a.clone().zip(c).error(), Some("boom"));
        assert_eq!(a.zip(QueryState::Ready("x")).data(), Some(&(1, "x")));
    }
}
