use crate::errors::RequestFailed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Disabled: a required parameter is missing, nothing was fetched
    Idle,
    Loading,
    Success,
    Error,
}

/// What a hook exposes: `{data, isLoading, error}`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: RequestFailed) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(error.into_message()),
        }
    }

    pub fn from_result(result: Result<T, RequestFailed>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failed(error),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            status: self.status,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok = QueryState::from_result(Ok::<_, RequestFailed>(vec![1]));
        assert_eq!(ok.status, QueryStatus::Success);
        assert_eq!(ok.data, Some(vec![1]));

        let err = QueryState::<Vec<u8>>::from_result(Err(RequestFailed::new("Failed to fetch tasks")));
        assert_eq!(err.status, QueryStatus::Error);
        assert_eq!(err.error.as_deref(), Some("Failed to fetch tasks"));
        assert!(err.data.is_none());
    }

    #[test]
    fn test_map_keeps_status() {
        let state = QueryState::success(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(state, QueryState::success(3));

        let idle = QueryState::<Vec<u8>>::idle().map(|v| v.len());
        assert!(idle.is_idle());
    }
}
