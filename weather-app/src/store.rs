//! Weather state store: the fetch-then-populate lifecycle behind the
//! dashboard.
//!
//! The store itself is synchronous — every transition is a plain method
//! on [`WeatherStore`], so the lifecycle is testable without a runtime.
//! [`WeatherSession`] drives it: at mount time the fallback fetch and the
//! device-geolocation fetch run as independent tasks, with one fixed race
//! policy:
//!
//! - a geolocation-derived result always overrides a fallback result;
//! - a fallback result never overrides a geolocation result
//!   (`location_fetched` guards at apply time — the pending fallback
//!   fetch is not aborted, its result is simply discarded);
//! - nothing applies after the session's cancellation token fires.

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use weather_core::WeatherDto;

use crate::api::{FetchError, ProxyClient};
use crate::geolocate::{FALLBACK_COORDS, LocationError, LocationProvider};

/// Lifecycle phase, derived from the store's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// At most one DTO at a time, replaced wholesale on each successful
/// fetch and cleared on a failed search.
#[derive(Debug, Clone, Default)]
pub struct WeatherStore {
    data: Option<WeatherDto>,
    loading: bool,
    error: Option<String>,
    location_fetched: bool,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&WeatherDto> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Error or informational banner text, if any. A banner can coexist
    /// with loaded data ("location access denied, showing fallback
    /// weather" is not a failure).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once a geolocation-derived result has been applied, i.e. the
    /// store shows the resolved device location rather than the fallback.
    pub fn location_fetched(&self) -> bool {
        self.location_fetched
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.data.is_some() {
            Phase::Loaded
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Enter `Loading` for the mount-time startup phase.
    pub fn begin_startup(&mut self) {
        self.loading = true;
    }

    /// Apply the fallback-location fetch. Ignored entirely once a
    /// geolocation result has landed — fallback never overrides it.
    pub fn apply_fallback_result(&mut self, result: Result<WeatherDto, FetchError>) {
        if self.location_fetched {
            return;
        }
        match result {
            Ok(dto) => {
                self.data = Some(dto);
                self.loading = false;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.loading = false;
            }
        }
    }

    /// Apply the geolocation-derived fetch. Always wins over fallback;
    /// on success it also clears any earlier banner.
    pub fn apply_located_result(&mut self, result: Result<WeatherDto, FetchError>) {
        match result {
            Ok(dto) => {
                self.data = Some(dto);
                self.error = None;
                self.location_fetched = true;
                self.loading = false;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.loading = false;
            }
        }
    }

    /// Record that device location was denied or unavailable. This is an
    /// informational banner, never a hard failure — fallback data keeps
    /// (or finishes) loading regardless.
    pub fn note_location_unavailable(&mut self, err: &LocationError) {
        let banner = match err {
            LocationError::Denied => "Location access denied, showing fallback weather",
            LocationError::Unsupported => "Geolocation not supported, showing fallback weather",
        };
        self.error = Some(banner.to_string());
    }

    /// Enter `Loading` for an explicit user search.
    pub fn begin_search(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a search result. A failed search discards the previous DTO:
    /// the UI shows the error view, not stale data.
    pub fn apply_search_result(&mut self, result: Result<WeatherDto, FetchError>) {
        match result {
            Ok(dto) => {
                self.data = Some(dto);
                self.error = None;
            }
            Err(err) => {
                self.data = None;
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }
}

/// Async driver: owns the store, the proxy client, and the cancellation
/// token scoping every in-flight fetch to this session's lifetime.
pub struct WeatherSession {
    client: ProxyClient,
    store: Arc<Mutex<WeatherStore>>,
    cancel: CancellationToken,
}

impl WeatherSession {
    pub fn new(client: ProxyClient) -> Self {
        Self {
            client,
            store: Arc::new(Mutex::new(WeatherStore::new())),
            cancel: CancellationToken::new(),
        }
    }

    pub fn snapshot(&self) -> WeatherStore {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Cancel the session; results resolving afterwards never apply.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Mount-time lifecycle: start the fallback fetch and the
    /// geolocation attempt as independent tasks and wait for both,
    /// unless the session is cancelled first.
    pub async fn mount<L: LocationProvider>(&self, locator: &L) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.with_store(WeatherStore::begin_startup);

        let fallback = async {
            let result = self.client.fetch_by_coords(FALLBACK_COORDS).await;
            if !self.cancel.is_cancelled() {
                self.with_store(|store| store.apply_fallback_result(result));
            }
        };

        let located = async {
            match locator.resolve().await {
                Ok(coords) => {
                    let result = self.client.fetch_by_coords(coords).await;
                    if !self.cancel.is_cancelled() {
                        self.with_store(|store| store.apply_located_result(result));
                    }
                }
                Err(err) => {
                    if !self.cancel.is_cancelled() {
                        self.with_store(|store| store.note_location_unavailable(&err));
                    }
                }
            }
        };

        tokio::select! {
            () = self.cancel.cancelled() => {}
            _ = async { tokio::join!(fallback, located) } => {}
        }
    }

    /// Explicit user search by place name.
    pub async fn search(&self, place: &str) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.with_store(WeatherStore::begin_search);

        let result = self.client.fetch_by_place(place).await;
        if !self.cancel.is_cancelled() {
            self.with_store(|store| store.apply_search_result(result));
        }
    }

    fn with_store(&self, f: impl FnOnce(&mut WeatherStore)) {
        let mut store = self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_dto::dto;

    #[test]
    fn startup_phases() {
        let mut store = WeatherStore::new();
        assert_eq!(store.phase(), Phase::Idle);

        store.begin_startup();
        assert_eq!(store.phase(), Phase::Loading);

        store.apply_fallback_result(Ok(dto("Manila")));
        assert_eq!(store.phase(), Phase::Loaded);
        assert!(!store.location_fetched());
    }

    #[test]
    fn geolocation_overrides_fallback() {
        let mut store = WeatherStore::new();
        store.begin_startup();

        store.apply_fallback_result(Ok(dto("Manila")));
        store.apply_located_result(Ok(dto("Berlin")));

        assert_eq!(store.data().unwrap().location, "Berlin");
        assert!(store.location_fetched());
    }

    #[test]
    fn late_fallback_never_overrides_geolocation() {
        let mut store = WeatherStore::new();
        store.begin_startup();

        store.apply_located_result(Ok(dto("Berlin")));
        store.apply_fallback_result(Ok(dto("Manila")));

        assert_eq!(store.data().unwrap().location, "Berlin");
        assert!(store.location_fetched());
    }

    #[test]
    fn denial_banner_coexists_with_loaded_data() {
        let mut store = WeatherStore::new();
        store.begin_startup();

        store.note_location_unavailable(&LocationError::Denied);
        store.apply_fallback_result(Ok(dto("Manila")));

        assert_eq!(store.phase(), Phase::Loaded);
        assert_eq!(store.error(), Some("Location access denied, showing fallback weather"));
        assert_eq!(store.data().unwrap().location, "Manila");
    }

    #[test]
    fn located_success_clears_banner() {
        let mut store = WeatherStore::new();
        store.begin_startup();

        store.note_location_unavailable(&LocationError::Denied);
        store.apply_located_result(Ok(dto("Berlin")));

        assert_eq!(store.error(), None);
    }

    #[test]
    fn failed_fallback_fetch_is_a_failure() {
        let mut store = WeatherStore::new();
        store.begin_startup();

        store.apply_fallback_result(Err(FetchError::Network));

        assert_eq!(store.phase(), Phase::Failed);
        assert_eq!(store.error(), Some("Network error or server is down"));
    }

    #[test]
    fn failed_search_discards_previous_data() {
        let mut store = WeatherStore::new();
        store.begin_startup();
        store.apply_fallback_result(Ok(dto("Manila")));

        store.begin_search();
        assert_eq!(store.phase(), Phase::Loading);

        store.apply_search_result(Err(FetchError::Api("City not found".into())));
        assert_eq!(store.phase(), Phase::Failed);
        assert!(store.data().is_none());
        assert_eq!(store.error(), Some("City not found"));
    }

    #[test]
    fn successful_search_replaces_data_wholesale() {
        let mut store = WeatherStore::new();
        store.begin_startup();
        store.apply_fallback_result(Ok(dto("Manila")));

        store.begin_search();
        store.apply_search_result(Ok(dto("Tokyo")));

        assert_eq!(store.phase(), Phase::Loaded);
        assert_eq!(store.data().unwrap().location, "Tokyo");
    }
}
