use chrono::{DateTime, Utc};

use crate::{FetchError, LocationQuery, ViewModel, WeatherReading};

/// Lifecycle of a single lookup as seen by the renderer.
///
/// The web server renders only after the lookup finishes, so served pages are
/// always `Ready` or `Failed`; `Fetching` is visible to callers driving the state
/// themselves, such as the `show` command.
#[derive(Debug, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Fetching { location: LocationQuery },
    Ready { location: LocationQuery, view: ViewModel },
    Failed { location: LocationQuery, error: FetchError },
}

impl ViewState {
    /// Start looking up `location`. Any previous result is dropped.
    pub fn begin(&mut self, location: LocationQuery) {
        *self = ViewState::Fetching { location };
    }

    /// Apply the outcome of a lookup for `location`.
    ///
    /// Returns `false` and leaves the state untouched when `location` is not the
    /// lookup currently in flight.
    pub fn complete(
        &mut self,
        location: &LocationQuery,
        result: Result<WeatherReading, FetchError>,
        now: DateTime<Utc>,
    ) -> bool {
        match self {
            ViewState::Fetching { location: pending } if *pending == *location => {}
            _ => return false,
        }

        let location = location.clone();
        *self = match result {
            Ok(reading) => ViewState::Ready { view: ViewModel::build(&reading, now), location },
            Err(error) => ViewState::Failed { location, error },
        };
        true
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, ViewState::Fetching { .. })
    }

    pub fn location(&self) -> Option<&LocationQuery> {
        match self {
            ViewState::Idle => None,
            ViewState::Fetching { location }
            | ViewState::Ready { location, .. }
            | ViewState::Failed { location, .. } => Some(location),
        }
    }

    /// View to render. Idle and in-flight lookups get a placeholder; a failed
    /// lookup gets nothing.
    pub fn view_model(&self) -> Option<ViewModel> {
        match self {
            ViewState::Idle => Some(ViewModel::placeholder("")),
            ViewState::Fetching { location } => Some(ViewModel::placeholder(location.as_str())),
            ViewState::Ready { view, .. } => Some(view.clone()),
            ViewState::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Final outcome of a finished lookup; `None` while idle or fetching.
    pub fn into_result(self) -> Option<Result<ViewModel, FetchError>> {
        match self {
            ViewState::Ready { view, .. } => Some(Ok(view)),
            ViewState::Failed { error, .. } => Some(Err(error)),
            ViewState::Idle | ViewState::Fetching { .. } => None,
        }
    }
}
