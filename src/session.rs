//! Dashboard session
//!
//! Owns the state a single dashboard instance works with: the selected
//! measurement system, the last query and the panel contents. Every fetch takes
//! a sequence number; results of a request that has been superseded by a newer
//! one are dropped instead of overwriting the newer data.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::api::WeatherProvider;
use crate::error::WeatherDashError;
use crate::models::{CurrentConditions, Forecast, LocationQuery, MeasurementSystem};
use crate::Result;

/// Contents of the dashboard panels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Panel {
    /// Nothing requested yet
    Empty,
    /// A request is in flight
    Loading,
    /// Current conditions, plus the forecast when it could be fetched.
    /// `units` is the system the numbers were fetched in.
    Ready {
        current: CurrentConditions,
        forecast: Option<Forecast>,
        units: MeasurementSystem,
    },
    /// The last request failed; both panels are cleared
    Failed { message: String, not_found: bool },
}

/// Snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub units: MeasurementSystem,
    /// Query behind the data currently shown
    pub last_query: Option<LocationQuery>,
    /// Query of the newest request while it is in flight
    pub pending_query: Option<LocationQuery>,
    pub panel: Panel,
}

impl SessionState {
    #[must_use]
    pub fn new(units: MeasurementSystem) -> Self {
        Self {
            units,
            last_query: None,
            pending_query: None,
            panel: Panel::Empty,
        }
    }
}

/// One dashboard session backed by a [`WeatherProvider`]
pub struct Dashboard<P> {
    provider: P,
    state: Mutex<SessionState>,
    sequence: AtomicU64,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, units: MeasurementSystem) -> Self {
        Self {
            provider,
            state: Mutex::new(SessionState::new(units)),
            sequence: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn units(&self) -> MeasurementSystem {
        self.state.lock().units
    }

    /// Look up a city by name. Blank input is rejected without a request.
    pub async fn search(&self, city: &str) -> Result<CurrentConditions> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherDashError::validation("City name cannot be empty"));
        }
        self.load(LocationQuery::Name(city.to_string())).await
    }

    pub async fn search_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions> {
        self.load(LocationQuery::Coordinates(latitude, longitude)).await
    }

    /// Switch the measurement system.
    ///
    /// The newest query (a request still in flight, otherwise the location
    /// shown) is fetched again in the new system; existing numbers are never
    /// converted locally. Returns `None` when there was nothing to refresh.
    pub async fn set_units(&self, units: MeasurementSystem) -> Result<Option<CurrentConditions>> {
        let request = {
            let mut state = self.state.lock();
            if state.units == units {
                return Ok(None);
            }
            state.units = units;
            let query = state.pending_query.clone().or_else(|| state.last_query.clone());
            query.map(|query| (self.begin(&mut state, &query), query))
        };

        info!("Measurement system changed to {}", units);
        match request {
            Some(((ticket, units), query)) => self.fetch(ticket, units, query).await.map(Some),
            None => Ok(None),
        }
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket
    }

    async fn load(&self, query: LocationQuery) -> Result<CurrentConditions> {
        let (ticket, units) = self.begin(&mut self.state.lock(), &query);
        self.fetch(ticket, units, query).await
    }

    /// Take a ticket for `query` and mark it as in flight
    fn begin(&self, state: &mut SessionState, query: &LocationQuery) -> (u64, MeasurementSystem) {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        state.pending_query = Some(query.clone());
        state.panel = Panel::Loading;
        (ticket, state.units)
    }

    async fn fetch(
        &self,
        ticket: u64,
        units: MeasurementSystem,
        query: LocationQuery,
    ) -> Result<CurrentConditions> {
        debug!("Request #{} for {} ({})", ticket, query, units);

        let current = match self.provider.current_weather(&query, units).await {
            Ok(current) => current,
            Err(err) => {
                self.commit(ticket, |state| {
                    state.pending_query = None;
                    state.panel = Panel::Failed {
                        message: err.user_message(),
                        not_found: err.is_not_found(),
                    };
                });
                return Err(err);
            }
        };

        // The forecast always follows the coordinates the upstream resolved
        let forecast = match self
            .provider
            .forecast(current.location.latitude, current.location.longitude, units)
            .await
        {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                warn!("Forecast unavailable for {}: {}", current.location.display_name(), err);
                None
            }
        };

        self.commit(ticket, |state| {
            state.pending_query = None;
            state.last_query = Some(query);
            state.panel = Panel::Ready {
                current: current.clone(),
                forecast,
                units,
            };
        });

        Ok(current)
    }

    /// Apply `update` only if `ticket` is still the newest request
    fn commit(&self, ticket: u64, update: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.lock();
        if self.is_latest(ticket) {
            update(&mut state);
        } else {
            debug!("Dropping result of superseded request #{}", ticket);
        }
    }
}
