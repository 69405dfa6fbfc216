//! In-memory collaborators for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::capabilities::{FetchError, FetchRequest, LocationDataSource, SelectorObserver};
use crate::level::Level;
use crate::model::LocationSelection;
use crate::LEVEL_COUNT;

/// Nested country → state → district → cities table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>,
}

impl Catalog {
    #[must_use]
    pub fn with_city(mut self, country: &str, state: &str, district: &str, city: &str) -> Self {
        self.countries
            .entry(country.to_string())
            .or_default()
            .entry(state.to_string())
            .or_default()
            .entry(district.to_string())
            .or_default()
            .push(city.to_string());
        self
    }

    /// Answers a request the way a well-behaved backend would: an empty
    /// parent has no children, unknown parents yield `NotFound`.
    pub fn lookup(&self, request: &FetchRequest) -> Result<Vec<String>, FetchError> {
        let not_found = |what: &str| FetchError::NotFound {
            what: what.to_string(),
        };
        let empty_parent = match request {
            FetchRequest::Countries => false,
            FetchRequest::States { country } => country.is_empty(),
            FetchRequest::Districts { state, .. } => state.is_empty(),
            FetchRequest::Cities { district, .. } => district.is_empty(),
        };
        if empty_parent {
            return Ok(Vec::new());
        }
        match request {
            FetchRequest::Countries => Ok(self.countries.keys().cloned().collect()),
            FetchRequest::States { country } => self
                .countries
                .get(country)
                .map(|states| states.keys().cloned().collect())
                .ok_or_else(|| not_found(country)),
            FetchRequest::Districts { country, state } => self
                .countries
                .get(country)
                .and_then(|states| states.get(state))
                .map(|districts| districts.keys().cloned().collect())
                .ok_or_else(|| not_found(state)),
            FetchRequest::Cities {
                country,
                state,
                district,
            } => self
                .countries
                .get(country)
                .and_then(|states| states.get(state))
                .and_then(|districts| districts.get(district))
                .cloned()
                .ok_or_else(|| not_found(district)),
        }
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog::default()
        .with_city("Brazil", "SP", "Centro", "Sao Paulo")
        .with_city("Brazil", "SP", "Centro", "Santos")
        .with_city("Brazil", "SP", "Moema", "Sao Paulo")
        .with_city("Brazil", "RJ", "Copacabana", "Rio de Janeiro")
        .with_city("India", "Kerala", "Ernakulam", "Kochi")
        .with_city("India", "Kerala", "Thrissur", "Guruvayur")
        .with_city("India", "Goa", "North Goa", "Panaji")
}

/// Catalog-backed data source with failure injection, call counting and
/// gates that hold a fetch open until released.
pub struct InMemorySource {
    catalog: Catalog,
    failing: [AtomicBool; LEVEL_COUNT],
    calls: [AtomicUsize; LEVEL_COUNT],
    gates: Mutex<HashMap<FetchRequest, Arc<Notify>>>,
}

impl InMemorySource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            failing: Default::default(),
            calls: Default::default(),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn sample() -> Self {
        Self::new(sample_catalog())
    }

    /// Makes every fetch that populates `level` fail.
    pub fn fail(&self, level: Level, failing: bool) {
        self.failing[level.index()].store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self, level: Level) -> usize {
        self.calls[level.index()].load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Holds every fetch equal to `request` until
    /// [`release`](Self::release) is called.
    pub fn hold(&self, request: FetchRequest) {
        self.lock_gates().insert(request, Arc::new(Notify::new()));
    }

    pub fn release(&self, request: &FetchRequest) {
        if let Some(gate) = self.lock_gates().remove(request) {
            gate.notify_one();
        }
    }

    fn lock_gates(&self) -> std::sync::MutexGuard<'_, HashMap<FetchRequest, Arc<Notify>>> {
        self.gates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn answer(&self, request: FetchRequest) -> Result<Vec<String>, FetchError> {
        let level = request.target();
        self.calls[level.index()].fetch_add(1, Ordering::SeqCst);

        let gate = self.lock_gates().get(&request).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing[level.index()].load(Ordering::SeqCst) {
            return Err(FetchError::network(format!("injected {level} failure")));
        }
        self.catalog.lookup(&request)
    }
}

#[async_trait::async_trait]
impl LocationDataSource for InMemorySource {
    async fn list_countries(&self) -> Result<Vec<String>, FetchError> {
        self.answer(FetchRequest::Countries).await
    }

    async fn list_states(&self, country: &str) -> Result<Vec<String>, FetchError> {
        let request = FetchRequest::States {
            country: country.to_string(),
        };
        self.answer(request).await
    }

    async fn list_districts(&self, country: &str, state: &str) -> Result<Vec<String>, FetchError> {
        let request = FetchRequest::Districts {
            country: country.to_string(),
            state: state.to_string(),
        };
        self.answer(request).await
    }

    async fn list_cities(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<String>, FetchError> {
        let request = FetchRequest::Cities {
            country: country.to_string(),
            state: state.to_string(),
            district: district.to_string(),
        };
        self.answer(request).await
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    submissions: Mutex<Vec<LocationSelection>>,
    fetch_errors: Mutex<Vec<(Level, FetchError)>>,
}

impl RecordingObserver {
    pub fn submissions(&self) -> Vec<LocationSelection> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn fetch_errors(&self) -> Vec<(Level, FetchError)> {
        self.fetch_errors
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

impl SelectorObserver for RecordingObserver {
    fn on_submit(&self, selection: &LocationSelection) {
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(selection.clone());
        }
    }

    fn on_fetch_error(&self, level: Level, error: &FetchError) {
        if let Ok(mut errors) = self.fetch_errors.lock() {
            errors.push((level, error.clone()));
        }
    }
}
