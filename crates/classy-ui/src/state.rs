//! Request lifecycle for the current search query.

/// What the presentation layer is showing for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing requested: startup, or a query too short to search.
    #[default]
    Idle,
    /// Lookup in flight for the current query.
    Loading,
    /// Place and forecast both arrived.
    Ready,
    /// Lookup failed; whatever was shown before stays on screen.
    Failed,
}

impl RequestState {
    /// State after the query changes. A searchable query starts loading,
    /// anything shorter goes back to idle.
    pub fn on_query_change(self, searchable: bool) -> Self {
        if searchable {
            RequestState::Loading
        } else {
            RequestState::Idle
        }
    }

    /// State after the forecast for the current query arrives.
    pub fn on_forecast_ready(self) -> Self {
        match self {
            RequestState::Loading => RequestState::Ready,
            other => other,
        }
    }

    /// State after the current lookup fails.
    pub fn on_failure(self) -> Self {
        match self {
            RequestState::Loading => RequestState::Failed,
            other => other,
        }
    }

    pub fn is_loading(self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Whether previously fetched data may be drawn.
    pub fn shows_forecast(self) -> bool {
        !matches!(self, RequestState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
    }

    #[test]
    fn query_change_starts_loading_from_any_state() {
        for s in [
            RequestState::Idle,
            RequestState::Loading,
            RequestState::Ready,
            RequestState::Failed,
        ] {
            assert_eq!(s.on_query_change(true), RequestState::Loading);
            assert_eq!(s.on_query_change(false), RequestState::Idle);
        }
    }

    #[test]
    fn forecast_completes_loading() {
        assert_eq!(
            RequestState::Loading.on_forecast_ready(),
            RequestState::Ready
        );
        assert_eq!(RequestState::Idle.on_forecast_ready(), RequestState::Idle);
    }

    #[test]
    fn failure_ends_loading() {
        assert_eq!(RequestState::Loading.on_failure(), RequestState::Failed);
        assert!(!RequestState::Failed.is_loading());
        assert_eq!(RequestState::Ready.on_failure(), RequestState::Ready);
    }

    #[test]
    fn idle_hides_forecast() {
        assert!(!RequestState::Idle.shows_forecast());
        assert!(RequestState::Loading.shows_forecast());
        assert!(RequestState::Ready.shows_forecast());
        assert!(RequestState::Failed.shows_forecast());
    }
}
