//! Route selection flow state
//!
//! A single tagged union replaces the pair of independent modal-visibility
//! flags the flow could otherwise be driven by: the list and the detail
//! view can never both be "open", and a detail view without routes is
//! unrepresentable.

use serde::{Deserialize, Serialize};

use super::{Route, RouteSet};

/// Which stage of the route-picking flow is active
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SelectionState {
    /// No routes fetched, or the flow was closed
    #[default]
    Idle,
    /// The list of alternatives is shown
    ListShown(RouteSet),
    /// One route is open in the detail view; the set is retained so the
    /// list can be returned to without refetching
    DetailShown {
        /// The full alternative set
        routes: RouteSet,
        /// Index of the opened route within `routes`
        selected: usize,
    },
}

impl SelectionState {
    /// Whether the flow is at rest
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The current route set, in list or detail stage
    #[must_use]
    pub const fn routes(&self) -> Option<&RouteSet> {
        match self {
            Self::Idle => None,
            Self::ListShown(routes) | Self::DetailShown { routes, .. } => Some(routes),
        }
    }

    /// Index of the opened route, in detail stage only
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        match self {
            Self::DetailShown { selected, .. } => Some(*selected),
            _ => None,
        }
    }

    /// The opened route, in detail stage only
    #[must_use]
    pub fn selected_route(&self) -> Option<&Route> {
        match self {
            Self::DetailShown { routes, selected } => routes.get(*selected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_routes() -> RouteSet {
        let route = |summary: &str| Route {
            summary: summary.to_string(),
            duration: "30 mins".to_string(),
            fare: 25.0,
            polyline: String::new(),
            steps: Vec::new(),
        };
        RouteSet::new(vec![route("Taft Ave"), route("EDSA")]).expect("non-empty")
    }

    #[test]
    fn default_is_idle() {
        let state = SelectionState::default();
        assert!(state.is_idle());
        assert!(state.routes().is_none());
        assert!(state.selected_route().is_none());
    }

    #[test]
    fn list_shown_exposes_routes_but_no_selection() {
        let state = SelectionState::ListShown(two_routes());
        assert!(!state.is_idle());
        assert_eq!(state.routes().map(RouteSet::len), Some(2));
        assert!(state.selected_index().is_none());
    }

    #[test]
    fn detail_shown_exposes_selected_route() {
        let state = SelectionState::DetailShown {
            routes: two_routes(),
            selected: 1,
        };
        assert_eq!(state.selected_index(), Some(1));
        assert_eq!(state.selected_route().map(|r| r.summary.as_str()), Some("EDSA"));
        // the set is still there for a future "back to list"
        assert_eq!(state.routes().map(RouteSet::len), Some(2));
    }
}
