//! komyut CLI
//!
//! Command-line front end for the commute planner: place search, route
//! planning with step-by-step detail, and the account backend flows.

#![allow(clippy::print_stdout)]

mod account;
mod trip;

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{AccountPort, DeviceLocationPort, DirectionsPort, PlacesPort};
use application::services::{PlaceSearchService, SessionService, TripPlannerService};
use clap::{Parser, Subcommand};
use infrastructure::{
    AccountAdapter, AppConfig, ConfiguredLocationAdapter, DirectionsAdapter, PlacesAdapter,
};
use integration_account::BackendAccountClient;
use integration_directions::GoogleDirectionsClient;
use integration_places::GooglePlacesClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// komyut CLI
#[derive(Parser)]
#[command(name = "komyut")]
#[command(author, version, about = "komyut commute planner CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for places matching a text query
    Search {
        /// Search text
        query: String,
    },

    /// Resolve the configured home position to an address
    Locate,

    /// Plan commute routes between two place searches
    Plan {
        /// Origin search text
        #[arg(short, long)]
        from: String,

        /// Destination search text
        #[arg(short, long)]
        to: String,

        /// Open this route (list position, starting at 0) in the detail view
        #[arg(short, long)]
        route: Option<usize>,
    },

    /// Create an account; an OTP is emailed for verification
    Register {
        /// Display name
        username: String,
        /// Login email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Verify the emailed OTP code
    VerifyOtp {
        /// Login email
        email: String,
        /// The code from the email
        otp: String,
    },

    /// Request a fresh OTP email
    ResendOtp {
        /// Login email
        email: String,
    },

    /// Log in and show the account profile
    Whoami {
        /// Login email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },

    /// Update profile fields (requires the current password)
    Profile {
        /// Login email
        email: String,
        /// Current password
        #[arg(long)]
        password: String,
        /// New display name
        #[arg(long)]
        new_username: Option<String>,
        /// New login email
        #[arg(long)]
        new_email: Option<String>,
        /// New password
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Submit a service review
    Review {
        /// Login email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// What went wrong
        #[arg(long)]
        issue: String,
        /// What could be better
        #[arg(long)]
        suggestion: String,
        /// Rating, 1 to 5
        #[arg(long)]
        rating: u8,
    },

    /// Change an account's role (admin feature)
    UpdateRole {
        /// Login email of the target account
        email: String,
        /// New role (0 = admin, 1 = commuter)
        role: u8,
    },

    /// List all accounts (admin feature)
    Users,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Print the one-line notice for recoverable failures; propagate the rest
fn report(result: Result<(), ApplicationError>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err @ (ApplicationError::Internal(_) | ApplicationError::Configuration(_))) => {
            Err(anyhow::anyhow!(err))
        }
        Err(err) => {
            println!("⚠ {}", err.user_notice());
            Ok(())
        }
    }
}

/// Everything the command handlers need, built once from config
struct App {
    origin_search: PlaceSearchService,
    destination_search: PlaceSearchService,
    planner: TripPlannerService,
    locator: Arc<dyn DeviceLocationPort>,
    session: SessionService,
    viewport_height: f64,
}

impl App {
    fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let places: Arc<dyn PlacesPort> = Arc::new(PlacesAdapter::new(
            GooglePlacesClient::new(&config.places).map_err(|e| anyhow::anyhow!(e))?,
        ));
        let directions: Arc<dyn DirectionsPort> = Arc::new(DirectionsAdapter::new(
            GoogleDirectionsClient::new(&config.directions).map_err(|e| anyhow::anyhow!(e))?,
        ));
        let account: Arc<dyn AccountPort> = Arc::new(AccountAdapter::new(
            BackendAccountClient::new(&config.account).map_err(|e| anyhow::anyhow!(e))?,
        ));

        tracing::debug!("Services wired from configuration");

        Ok(Self {
            // one suggestion channel per search box
            origin_search: PlaceSearchService::new(Arc::clone(&places), config.search),
            destination_search: PlaceSearchService::new(places, config.search),
            planner: TripPlannerService::new(directions),
            locator: Arc::new(ConfiguredLocationAdapter::new(config.home_location())),
            session: SessionService::new(account),
            viewport_height: config.viewport_height,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {e}"))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("config: {e}"))?;

    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Search { query } => report(trip::search(&app.origin_search, &query).await),

        Commands::Locate => {
            report(trip::locate(app.locator.as_ref(), &app.origin_search).await)
        }

        Commands::Plan { from, to, route } => report(trip::plan(&app, &from, &to, route).await),

        Commands::Register {
            username,
            email,
            password,
        } => report(account::register(&app.session, &username, &email, &password).await),

        Commands::VerifyOtp { email, otp } => {
            report(account::verify_otp(&app.session, &email, &otp).await)
        }

        Commands::ResendOtp { email } => {
            report(account::resend_otp(&app.session, &email).await)
        }

        Commands::Whoami { email, password } => {
            report(account::whoami(&app.session, &email, &password).await)
        }

        Commands::Profile {
            email,
            password,
            new_username,
            new_email,
            new_password,
        } => report(
            account::update_profile(
                &app.session,
                &email,
                &password,
                new_username,
                new_email,
                new_password,
            )
            .await,
        ),

        Commands::Review {
            email,
            password,
            issue,
            suggestion,
            rating,
        } => report(
            account::review(&app.session, &email, &password, &issue, &suggestion, rating).await,
        ),

        Commands::UpdateRole { email, role } => {
            report(account::update_role(&app.session, &email, role).await)
        }

        Commands::Users => report(account::users(&app.session).await),
    }
}
