//! View state and the reducer that updates it.
//!
//! Each data set lives in its own [`Slot`]. A slot hands out a new generation
//! whenever a request starts and only accepts the outcome tagged with the
//! latest one, so an older response that arrives late is dropped.

use serde::Serialize;

use crate::model::{Coordinates, CurrentWeather, DailySummary};

pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSet {
    Current,
    Forecast,
}

#[derive(Debug, Clone, Serialize)]
pub struct Slot<T> {
    data: Option<T>,
    loading: bool,
    #[serde(skip)]
    issued: Generation,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { data: None, loading: false, issued: 0 }
    }
}

impl<T> Slot<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> Generation {
        self.issued
    }

    fn begin(&mut self) -> Generation {
        self.issued += 1;
        self.loading = true;
        self.issued
    }

    /// Clear the loading flag if `generation` is current; `false` means stale.
    fn settle(&mut self, generation: Generation) -> bool {
        if generation != self.issued {
            return false;
        }
        self.loading = false;
        true
    }
}

/// Outcomes fed back into the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LocationResolved(Coordinates),
    LocationFailed(String),
    CurrentLoaded { generation: Generation, data: CurrentWeather },
    CurrentFailed { generation: Generation, message: String },
    ForecastLoaded { generation: Generation, data: Vec<DailySummary> },
    ForecastFailed { generation: Generation, message: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    current: Slot<CurrentWeather>,
    forecast: Slot<Vec<DailySummary>>,
    location: Option<Coordinates>,
    error: Option<String>,
}

impl ViewState {
    pub fn current(&self) -> &Slot<CurrentWeather> {
        &self.current
    }

    pub fn forecast(&self) -> &Slot<Vec<DailySummary>> {
        &self.forecast
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while any request is in flight.
    pub fn is_loading(&self) -> bool {
        self.current.loading || self.forecast.loading
    }

    pub fn has_data(&self) -> bool {
        self.current.data.is_some() || self.forecast.data.is_some()
    }

    /// Start a request for `set` and return the generation its outcome must carry.
    ///
    /// A new request clears the error slot; data from earlier requests stays visible.
    pub fn begin(&mut self, set: DataSet) -> Generation {
        self.error = None;
        match set {
            DataSet::Current => self.current.begin(),
            DataSet::Forecast => self.forecast.begin(),
        }
    }

    /// Apply an outcome. Returns `false` when it was stale and ignored.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::LocationResolved(coords) => {
                self.location = Some(coords);
                true
            }
            Action::LocationFailed(message) => {
                self.error = Some(message);
                true
            }
            Action::CurrentLoaded { generation, data } => {
                let fresh = self.current.settle(generation);
                if fresh {
                    self.current.data = Some(data);
                }
                fresh
            }
            Action::CurrentFailed { generation, message } => {
                let fresh = self.current.settle(generation);
                if fresh {
                    self.error = Some(message);
                }
                fresh
            }
            Action::ForecastLoaded { generation, data } => {
                let fresh = self.forecast.settle(generation);
                if fresh {
                    self.forecast.data = Some(data);
                }
                fresh
            }
            Action::ForecastFailed { generation, message } => {
                let fresh = self.forecast.settle(generation);
                if fresh {
                    self.error = Some(message);
                }
                fresh
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::WeatherIcon;

    fn weather(name: &str) -> CurrentWeather {
        CurrentWeather {
            temperature: 12,
            humidity_percent: 70,
            wind_speed_kmh: 4.0,
            location_name: name.to_string(),
            icon_code: "02d".into(),
            icon: WeatherIcon::Cloud,
        }
    }

    #[test]
    fn begin_sets_loading_and_increments_generation() {
        let mut state = ViewState::default();

        let first = state.begin(DataSet::Current);
        let second = state.begin(DataSet::Current);

        assert_eq!((first, second), (1, 2));
        assert!(state.is_loading());
        assert!(state.current().is_loading());
        assert!(!state.forecast().is_loading());
    }

    #[test]
    fn stale_success_is_ignored() {
        let mut state = ViewState::default();
        let old = state.begin(DataSet::Current);
        let new = state.begin(DataSet::Current);

        assert!(state.apply(Action::CurrentLoaded { generation: new, data: weather("New") }));
        assert!(!state.apply(Action::CurrentLoaded { generation: old, data: weather("Old") }));

        assert_eq!(state.current().data().unwrap().location_name, "New");
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_response_keeps_loading_until_latest_arrives() {
        let mut state = ViewState::default();
        let old = state.begin(DataSet::Forecast);
        let new = state.begin(DataSet::Forecast);

        assert!(!state.apply(Action::ForecastLoaded { generation: old, data: vec![] }));
        assert!(state.forecast().is_loading());
        assert!(state.forecast().data().is_none());

        assert!(state.apply(Action::ForecastLoaded { generation: new, data: vec![] }));
        assert!(!state.forecast().is_loading());
    }

    #[test]
    fn failure_in_one_slot_keeps_the_other() {
        let mut state = ViewState::default();
        let cur = state.begin(DataSet::Current);
        state.apply(Action::CurrentLoaded { generation: cur, data: weather("Rome") });

        let fc = state.begin(DataSet::Forecast);
        state.apply(Action::ForecastFailed { generation: fc, message: "boom".into() });

        assert_eq!(state.error(), Some("boom"));
        assert_eq!(state.current().data().unwrap().location_name, "Rome");
    }

    #[test]
    fn failure_keeps_previous_data_in_same_slot() {
        let mut state = ViewState::default();
        let first = state.begin(DataSet::Current);
        state.apply(Action::CurrentLoaded { generation: first, data: weather("Rome") });

        let second = state.begin(DataSet::Current);
        state.apply(Action::CurrentFailed { generation: second, message: "nope".into() });

        assert_eq!(state.current().data().unwrap().location_name, "Rome");
        assert!(!state.is_loading());
    }

    #[test]
    fn new_request_clears_error() {
        let mut state = ViewState::default();
        state.apply(Action::LocationFailed("denied".into()));
        assert_eq!(state.error(), Some("denied"));

        state.begin(DataSet::Current);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn serializes_without_generations() {
        let mut state = ViewState::default();
        state.apply(Action::LocationResolved(Coordinates::new(1.0, 2.0)));

        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["location"]["latitude"], 1.0);
        assert_eq!(json["current"]["loading"], false);
        assert!(json["current"].get("issued").is_none());
    }
}
