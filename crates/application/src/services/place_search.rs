//! Place search service
//!
//! The live-suggestion channel behind the two search boxes. Instead of a
//! network call per keystroke, the channel is debounced, and a response
//! that arrives for text the user has since changed is discarded rather
//! than applied out of order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use domain::value_objects::{GeoLocation, Place};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{PlaceSuggestion, PlacesPort};

/// Tuning for the suggestion channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSearchConfig {
    /// Minimum interval between upstream autocomplete calls in
    /// milliseconds (0 disables debouncing)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    300
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl PlaceSearchConfig {
    /// Configuration for tests: no debouncing
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { debounce_ms: 0 }
    }
}

/// What happened to one `suggest` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Current suggestions for the query
    Suggestions(Vec<PlaceSuggestion>),
    /// The input text changed while the call was in flight; the response
    /// was discarded
    Stale,
    /// Suppressed: the previous call was issued too recently
    Debounced,
}

/// Mutable search channel state
#[derive(Debug, Default)]
struct SearchState {
    /// The text currently in the search box
    input: String,
    /// When the last upstream call was issued
    last_issued: Option<Instant>,
}

/// Service mediating autocomplete, pick resolution, and reverse lookup
pub struct PlaceSearchService {
    places: Arc<dyn PlacesPort>,
    config: PlaceSearchConfig,
    state: Mutex<SearchState>,
}

impl std::fmt::Debug for PlaceSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearchService")
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl PlaceSearchService {
    /// Create a search service over a places port
    #[must_use]
    pub fn new(places: Arc<dyn PlacesPort>, config: PlaceSearchConfig) -> Self {
        Self {
            places,
            config,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Record the current search box text without querying
    pub fn update_input(&self, text: &str) {
        self.state.lock().input = text.to_string();
    }

    /// Current search box text
    #[must_use]
    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    /// Fetch suggestions for the current keystroke
    ///
    /// Empty or whitespace-only input fails with
    /// [`ApplicationError::NoResults`] without touching the network.
    /// A call issued within the debounce window is suppressed
    /// ([`SuggestOutcome::Debounced`]); a response that returns after the
    /// input changed is discarded ([`SuggestOutcome::Stale`]).
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Result<SuggestOutcome, ApplicationError> {
        {
            let mut state = self.state.lock();
            state.input = query.to_string();

            if query.trim().is_empty() {
                return Err(ApplicationError::NoResults);
            }

            if self.config.debounce_ms > 0 {
                if let Some(last) = state.last_issued {
                    if last.elapsed() < Duration::from_millis(self.config.debounce_ms) {
                        debug!(%query, "Debouncing autocomplete call");
                        return Ok(SuggestOutcome::Debounced);
                    }
                }
            }
            state.last_issued = Some(Instant::now());
        }

        let suggestions = self.places.autocomplete(query).await?;

        let state = self.state.lock();
        if state.input != query {
            debug!(%query, current = %state.input, "Discarding stale autocomplete response");
            return Ok(SuggestOutcome::Stale);
        }

        Ok(SuggestOutcome::Suggestions(suggestions))
    }

    /// Resolve a picked suggestion to a full place
    ///
    /// On success the search box text is replaced with the place name,
    /// mirroring how picking a suggestion fills the input.
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_id: &str) -> Result<Place, ApplicationError> {
        let place = self.places.place_details(place_id).await?;
        self.state.lock().input = place.name.clone();
        Ok(place)
    }

    /// Resolve coordinates (locate-me or a map tap) to a place
    ///
    /// The resolved address is fed back into the search box as text; no
    /// second geocode call is made for that.
    #[instrument(skip(self))]
    pub async fn resolve_position(
        &self,
        location: GeoLocation,
    ) -> Result<Place, ApplicationError> {
        let place = self.places.reverse_geocode(location).await?;
        self.state.lock().input = place.address.clone();
        Ok(place)
    }
}
