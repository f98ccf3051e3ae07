//! Query orchestration.
//!
//! A [`WeatherSession`] owns the provider and the view state. Every query
//! follows the same path: begin (issue a generation, mark the slot loading),
//! one request, map the payload, dispatch the outcome.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    aggregate::daily_summaries,
    current::map_current,
    geolocation::Geolocator,
    model::{Coordinates, Query},
    provider::WeatherProvider,
    state::{Action, DataSet, Generation, ViewState},
};

#[derive(Debug)]
pub struct WeatherSession<P> {
    provider: P,
    state: watch::Sender<ViewState>,
}

impl<P: WeatherProvider> WeatherSession<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { provider, state }
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub async fn current_by_coords(&self, coords: Coordinates) {
        self.load_current(Query::Coordinates(coords)).await;
    }

    pub async fn current_by_city(&self, city: &str) {
        self.load_current(Query::city(city)).await;
    }

    pub async fn forecast_by_coords(&self, coords: Coordinates) {
        self.load_forecast(Query::Coordinates(coords)).await;
    }

    pub async fn forecast_by_city(&self, city: &str) {
        self.load_forecast(Query::city(city)).await;
    }

    /// Fetch current conditions and forecast for a city side by side.
    pub async fn search(&self, city: &str) {
        tokio::join!(self.current_by_city(city), self.forecast_by_city(city));
    }

    pub async fn load_coords(&self, coords: Coordinates) {
        tokio::join!(self.current_by_coords(coords), self.forecast_by_coords(coords));
    }

    /// Resolve the startup position once and load both data sets for it.
    ///
    /// On failure the error is recorded and nothing is fetched.
    pub async fn locate_and_load(&self, geolocator: &dyn Geolocator) {
        match geolocator.locate().await {
            Ok(coords) => {
                info!(location = %coords, "Location resolved");
                self.dispatch(Action::LocationResolved(coords));
                self.load_coords(coords).await;
            }
            Err(err) => {
                warn!(error = %err, "Geolocation failed");
                self.dispatch(Action::LocationFailed(err.to_string()));
            }
        }
    }

    async fn load_current(&self, query: Query) {
        let generation = self.begin(DataSet::Current);

        let action = match self.provider.current(&query).await {
            Ok(obs) => Action::CurrentLoaded { generation, data: map_current(&obs) },
            Err(err) => {
                warn!(%query, error = %err, "Current conditions request failed");
                Action::CurrentFailed { generation, message: err.to_string() }
            }
        };

        self.dispatch(action);
    }

    async fn load_forecast(&self, query: Query) {
        let generation = self.begin(DataSet::Forecast);

        let action = match self.provider.forecast(&query).await {
            Ok(payload) => Action::ForecastLoaded {
                generation,
                data: daily_summaries(&payload.samples, payload.utc_offset),
            },
            Err(err) => {
                warn!(%query, error = %err, "Forecast request failed");
                Action::ForecastFailed { generation, message: err.to_string() }
            }
        };

        self.dispatch(action);
    }

    fn begin(&self, set: DataSet) -> Generation {
        let mut generation = 0;
        self.state.send_modify(|state| generation = state.begin(set));
        generation
    }

    fn dispatch(&self, action: Action) {
        let mut applied = false;
        self.state.send_modify(|state| applied = state.apply(action));
        if !applied {
            debug!("Dropped stale response");
        }
    }
}
