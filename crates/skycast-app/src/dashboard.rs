//! Dashboard state machine.
//!
//! Holds the current [`WeatherSnapshot`], the advisories derived from it,
//! and the user-facing error banner. Fetches are tagged with a
//! monotonically increasing ticket so that a response from a superseded
//! request can never overwrite the state of a newer one: only the most
//! recently issued ticket is allowed to apply.

use std::sync::Arc;

use parking_lot::Mutex;

use skycast_core::{AppError, Config};
use skycast_weather::{
    derive_advisories, Advisory, WeatherError, WeatherProvider, WeatherSnapshot,
};

use crate::favorites::{FavoriteCity, Favorites, FavoritesStore, JsonFavoritesStore};

/// Token identifying one in-flight fetch. Only the most recently issued
/// ticket may mutate dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
struct DashboardState {
    snapshot: Option<WeatherSnapshot>,
    advisories: Vec<Advisory>,
    error: Option<String>,
    /// Last ticket issued. Lives under the same lock as the snapshot so
    /// that the staleness check and the mutation are one critical section.
    latest_ticket: u64,
}

pub struct Dashboard<S: FavoritesStore> {
    provider: Arc<WeatherProvider>,
    state: Mutex<DashboardState>,
    favorites: Mutex<Favorites<S>>,
}

impl Dashboard<JsonFavoritesStore> {
    /// Wire a dashboard from application configuration: provider settings
    /// from the weather section, favorites file under the config dir.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let mut provider = WeatherProvider::new(&config.weather.api_key)?
            .with_base_url(&config.weather.base_url)
            .with_forecast_days(config.weather.forecast_days);
        if let Some(lang) = &config.weather.lang {
            provider = provider.with_lang(lang);
        }
        Self::new(provider, JsonFavoritesStore::new(&config.config_dir))
    }
}

impl<S: FavoritesStore> Dashboard<S> {
    pub fn new(provider: WeatherProvider, store: S) -> Result<Self, AppError> {
        let favorites = Favorites::load(store)?;
        Ok(Self {
            provider: Arc::new(provider),
            state: Mutex::new(DashboardState::default()),
            favorites: Mutex::new(favorites),
        })
    }

    /// Issue a ticket for a new fetch, superseding any in-flight one.
    /// Starting a new attempt also clears the error banner.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.lock();
        state.error = None;
        state.latest_ticket += 1;
        FetchTicket(state.latest_ticket)
    }

    /// Apply a fetch outcome. Returns `false` when the ticket was stale
    /// (a newer fetch has been issued) and the response was discarded.
    pub fn apply_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> bool {
        let mut state = self.state.lock();
        if ticket.0 != state.latest_ticket {
            tracing::debug!(ticket = ticket.0, "Discarding stale fetch response");
            return false;
        }

        match result {
            Ok(snapshot) => {
                // Snapshot and advisories change atomically, under one lock.
                state.advisories = derive_advisories(&snapshot);
                state.snapshot = Some(snapshot);
                state.error = None;
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                state.error = Some(e.user_message().to_string());
            }
        }
        true
    }

    /// Fetch weather for a query and apply the outcome. Returns `false`
    /// when the response was superseded by a newer fetch.
    pub async fn fetch(&self, query: &str) -> bool {
        let ticket = self.begin_fetch();
        let result = self.provider.fetch(query).await;
        self.apply_fetch(ticket, result)
    }

    /// Fetch weather for a coordinate pair (geolocation path).
    pub async fn fetch_coords(&self, latitude: f64, longitude: f64) -> bool {
        let query = WeatherProvider::coords_query(latitude, longitude);
        self.fetch(&query).await
    }

    /// Fire-and-forget fetch on a tokio task.
    pub fn spawn_fetch(self: &Arc<Self>, query: String) -> tokio::task::JoinHandle<bool>
    where
        S: Send + 'static,
    {
        let dashboard = Arc::clone(self);
        tokio::spawn(async move { dashboard.fetch(&query).await })
    }

    pub fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.state.lock().snapshot.clone()
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        self.state.lock().advisories.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Shareable plain-text summary of the current snapshot, if any.
    pub fn share_text(&self) -> Option<String> {
        self.state
            .lock()
            .snapshot
            .as_ref()
            .map(crate::share::share_text)
    }

    /// Whether the currently displayed city is a favorite.
    pub fn is_favorite(&self) -> bool {
        let state = self.state.lock();
        match &state.snapshot {
            Some(snap) => self
                .favorites
                .lock()
                .contains(&snap.location.city, &snap.location.region),
            None => false,
        }
    }

    /// Toggle the currently displayed city in the favorites list.
    /// Returns `None` when no snapshot is loaded, otherwise `Some(added)`.
    pub fn toggle_favorite(&self) -> Result<Option<bool>, AppError> {
        let location = match self.state.lock().snapshot.as_ref() {
            Some(snap) => snap.location.clone(),
            None => return Ok(None),
        };
        let favorite = FavoriteCity {
            query_key: format!("{},{}", location.city, location.region),
            name: location.city,
            region: location.region,
        };
        let added = self.favorites.lock().toggle(favorite)?;
        Ok(Some(added))
    }

    pub fn remove_favorite(&self, name: &str, region: &str) -> Result<bool, AppError> {
        Ok(self.favorites.lock().remove(name, region)?)
    }

    pub fn favorites(&self) -> Vec<FavoriteCity> {
        self.favorites.lock().list().to_vec()
    }
}
