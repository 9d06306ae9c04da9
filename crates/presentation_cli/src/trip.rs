//! Trip planning command handlers

use application::error::ApplicationError;
use application::ports::DeviceLocationPort;
use application::services::polyline;
use application::services::{PlaceSearchService, SuggestOutcome};
use domain::entities::RouteSet;
use domain::value_objects::{DragPanel, Place};

use crate::App;

/// Print the suggestion list for a search text
pub async fn search(
    search: &PlaceSearchService,
    query: &str,
) -> Result<(), ApplicationError> {
    match search.suggest(query).await? {
        SuggestOutcome::Suggestions(suggestions) => {
            println!("Places matching \"{query}\":");
            for suggestion in &suggestions {
                println!("  • {}  ({})", suggestion.description, suggestion.place_id);
            }
            Ok(())
        }
        // a one-shot command has no competing keystrokes
        outcome => Err(ApplicationError::Internal(format!(
            "unexpected suggestion outcome {outcome:?}"
        ))),
    }
}

/// Resolve the configured position to an address, as the locate-me flow
pub async fn locate(
    locator: &dyn DeviceLocationPort,
    search: &PlaceSearchService,
) -> Result<(), ApplicationError> {
    let position = locator.current_position().await?;
    let resolved = search.resolve_position(position).await?;
    let here = Place::my_location(position, resolved.address);
    println!("📍 {here}");
    println!("   search box now reads: {}", search.input());
    Ok(())
}

/// Plan routes between two search texts and optionally open one
pub async fn plan(
    app: &App,
    from: &str,
    to: &str,
    route: Option<usize>,
) -> Result<(), ApplicationError> {
    let origin = resolve_first(&app.origin_search, from).await?;
    println!("📍 Start: {origin}");
    let destination = resolve_first(&app.destination_search, to).await?;
    println!("🏁 Destination: {destination}");

    app.planner.set_origin(origin);
    app.planner.set_destination(destination);
    app.planner.fetch_routes().await?;

    let selection = app.planner.selection();
    let Some(routes) = selection.routes() else {
        return Err(ApplicationError::Internal(
            "fetch succeeded without a route list".to_string(),
        ));
    };

    let panel = DragPanel::from_viewport(app.viewport_height)
        .map_err(|e| ApplicationError::Internal(e.to_string()))?;
    println!(
        "\nSelect a Route ({} found, panel {:.0}px):",
        routes.len(),
        panel.height()
    );
    for (rank, candidate) in routes.routes().iter().enumerate() {
        println!(
            "  [{rank}] {}  (line {})",
            candidate.format_summary(),
            RouteSet::rank_color(rank)
        );
    }

    if let Some(index) = route {
        // rows outside the list are not selectable in the app; mirror the
        // guard here instead of letting the controller reject it
        if index >= routes.len() {
            return Err(ApplicationError::SelectionOutOfRange {
                index,
                len: routes.len(),
            });
        }
        app.planner.select_route(index)?;
        show_detail(app)?;
        app.planner.close();
    }

    Ok(())
}

/// Render the detail view for the currently selected route
fn show_detail(app: &App) -> Result<(), ApplicationError> {
    let Some(route) = app.planner.selected_route() else {
        return Err(ApplicationError::Internal(
            "detail view without a selected route".to_string(),
        ));
    };

    println!("\nRoute Details: {}", route.format_summary());
    for step in &route.steps {
        println!("  {}", step.format_detail().replace('\n', "\n  "));
        if let Some(boarding) = step.transit.as_ref().and_then(|t| t.boarding) {
            println!("    📌 board at {boarding}");
        }
    }
    if route.steps.is_empty() {
        println!("  (no step-by-step instructions for this route)");
    }

    // decoded only now, for the one route the user opened
    let points = polyline::decode(&route.polyline);
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        println!("🗺 Route line: {} points, {first} → {last}", points.len());
    } else {
        println!("🗺 No route line available");
    }

    Ok(())
}

/// Resolve a search text to its top suggestion's full place
async fn resolve_first(
    search: &PlaceSearchService,
    text: &str,
) -> Result<Place, ApplicationError> {
    match search.suggest(text).await? {
        SuggestOutcome::Suggestions(suggestions) => {
            let first = suggestions.first().ok_or(ApplicationError::NoResults)?;
            search.resolve(&first.place_id).await
        }
        outcome => Err(ApplicationError::Internal(format!(
            "unexpected suggestion outcome {outcome:?}"
        ))),
    }
}
