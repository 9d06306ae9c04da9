//! Trip planner service
//!
//! Owns the route-selection state machine: which of idle / route list /
//! route detail is active and which route is current. All mutation of
//! [`SelectionState`] happens through this service; other components see
//! snapshots only.
//!
//! Overlapping fetches are resolved with a monotonically increasing
//! sequence number: a response is applied only when it still carries the
//! latest issued sequence, so a slow early response can never overwrite
//! the routes of a later search. Nothing is cancelled upstream; stale
//! results are simply discarded.

use std::sync::Arc;

use domain::entities::{Route, SelectionState};
use domain::value_objects::Place;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::DirectionsPort;

/// What happened to one `fetch_routes` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was current and the list is now shown
    Applied,
    /// A newer fetch was issued meanwhile; this response was discarded
    Superseded,
}

/// Mutable planner state, guarded by one lock
#[derive(Debug, Default)]
struct PlannerState {
    origin: Option<Place>,
    destination: Option<Place>,
    selection: SelectionState,
    /// Sequence of the most recently issued fetch
    fetch_seq: u64,
}

/// Service driving the route search and selection flow
pub struct TripPlannerService {
    directions: Arc<dyn DirectionsPort>,
    state: Mutex<PlannerState>,
}

impl std::fmt::Debug for TripPlannerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripPlannerService")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl TripPlannerService {
    /// Create a planner over a directions port
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>) -> Self {
        Self {
            directions,
            state: Mutex::new(PlannerState::default()),
        }
    }

    /// Replace the origin wholesale
    pub fn set_origin(&self, place: Place) {
        self.state.lock().origin = Some(place);
    }

    /// Replace the destination wholesale
    pub fn set_destination(&self, place: Place) {
        self.state.lock().destination = Some(place);
    }

    /// Current origin, if resolved
    #[must_use]
    pub fn origin(&self) -> Option<Place> {
        self.state.lock().origin.clone()
    }

    /// Current destination, if resolved
    #[must_use]
    pub fn destination(&self) -> Option<Place> {
        self.state.lock().destination.clone()
    }

    /// Snapshot of the selection state
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection.clone()
    }

    /// Fetch route alternatives for the chosen endpoints
    ///
    /// Requires both origin and destination to be resolved, otherwise
    /// fails with [`ApplicationError::MissingEndpoints`] and leaves the
    /// state untouched. On a current response the state transitions to
    /// `ListShown`; a superseded response is discarded, including its
    /// errors.
    #[instrument(skip(self))]
    pub async fn fetch_routes(&self) -> Result<FetchOutcome, ApplicationError> {
        let (origin, destination, seq) = {
            let mut state = self.state.lock();
            let origin = state
                .origin
                .clone()
                .ok_or(ApplicationError::MissingEndpoints)?;
            let destination = state
                .destination
                .clone()
                .ok_or(ApplicationError::MissingEndpoints)?;
            state.fetch_seq += 1;
            (origin, destination, state.fetch_seq)
        };

        debug!(seq, %origin, %destination, "Fetching route alternatives");
        let result = self.directions.route_alternatives(&origin, &destination).await;

        let mut state = self.state.lock();
        if state.fetch_seq != seq {
            debug!(seq, latest = state.fetch_seq, "Discarding superseded route response");
            return Ok(FetchOutcome::Superseded);
        }

        let routes = result?;
        debug!(seq, count = routes.len(), "Showing route list");
        state.selection = SelectionState::ListShown(routes);
        Ok(FetchOutcome::Applied)
    }

    /// Open one route of the shown list in the detail view
    ///
    /// An out-of-range index fails with
    /// [`ApplicationError::SelectionOutOfRange`] and leaves the state
    /// unchanged; no partial transition happens. Selecting while the
    /// detail view is open switches the selection.
    pub fn select_route(&self, index: usize) -> Result<(), ApplicationError> {
        let mut state = self.state.lock();
        match std::mem::take(&mut state.selection) {
            SelectionState::Idle => {
                warn!(index, "Route selected with no list shown");
                Err(ApplicationError::Internal(
                    "no route list to select from".to_string(),
                ))
            }
            SelectionState::ListShown(routes)
            | SelectionState::DetailShown { routes, .. } => {
                if index >= routes.len() {
                    let len = routes.len();
                    warn!(index, len, "Route index out of range");
                    state.selection = SelectionState::ListShown(routes);
                    return Err(ApplicationError::SelectionOutOfRange { index, len });
                }
                state.selection = SelectionState::DetailShown {
                    routes,
                    selected: index,
                };
                Ok(())
            }
        }
    }

    /// Close the list or detail view
    ///
    /// Idempotent: closing while already idle is a no-op. The previous
    /// route set is dropped from the state, not destroyed mid-use; the
    /// next search simply replaces it.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.selection.is_idle() {
            state.selection = SelectionState::Idle;
        }
    }

    /// The route open in the detail view, if any
    #[must_use]
    pub fn selected_route(&self) -> Option<Route> {
        self.state.lock().selection.selected_route().cloned()
    }
}
