//! Spinovo admin CLI
//!
//! Operator console for the Spinovo laundry service: sign in, inspect
//! customers and bookings, manage co-pilots, service areas and packages.

use clap::{Args, Parser, Subcommand};
use owo_colors::{OwoColorize, Stream};
use spinovo_core::{AppError, ErrorClassifier};
use spinovo_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod app;
mod commands;
mod output;

use app::App;
use commands::{
    assignments, auth, bookings, copilots, customers, dashboard, locations, otp, packages,
    transactions,
};
use output::{OutputFormat, Status};

/// Admin console for the Spinovo laundry service
#[derive(Parser)]
#[command(name = "spinovo-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Read client settings from a TOML file instead of the environment
    #[arg(short, long, global = true, env = "SPINOVO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Page selection shared by list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (at most 100)
    #[arg(short, long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an admin mobile number and password
    Login {
        /// 10-digit mobile number
        #[arg(short, long)]
        mobile: String,

        /// Password (prefer the environment variable)
        #[arg(short, long, env = "SPINOVO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the stored session
    Status,

    /// Fetch the signed-in admin's profile
    Whoami,

    /// Show dashboard totals and today's bookings
    Dashboard,

    /// Browse customers
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },

    /// Browse and assign bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },

    /// Manage co-pilots (pickup and delivery staff)
    Copilots {
        #[command(subcommand)]
        action: CopilotsAction,
    },

    /// List booking assignments
    Assignments {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List wallet transactions
    Transactions {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List OTP requests
    Otp {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Manage states, cities and serviceable areas
    Locations {
        #[command(subcommand)]
        action: LocationsAction,
    },

    /// Manage subscription packages
    Packages {
        #[command(subcommand)]
        action: PackagesAction,
    },
}

#[derive(Subcommand)]
enum CustomersAction {
    /// List customers
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a customer with orders, addresses and wallet history
    Show {
        /// Customer ID
        id: String,
    },
}

#[derive(Subcommand)]
enum BookingsAction {
    /// List bookings
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a booking
    Show {
        /// Booking ID
        id: String,
    },
    /// Assign a booking to a co-pilot
    Assign {
        /// Booking ID
        booking: String,

        /// Co-pilot ID
        #[arg(long)]
        copilot: String,
    },
}

#[derive(Subcommand)]
enum CopilotsAction {
    /// List co-pilots
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a co-pilot
    Show {
        /// Co-pilot ID
        id: String,
    },
    /// Register a co-pilot
    Create {
        #[arg(short, long)]
        name: String,

        /// 10-digit mobile number
        #[arg(short, long)]
        mobile: String,

        /// Initial password
        #[arg(short, long, env = "SPINOVO_COPILOT_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum LocationsAction {
    /// Show the state, city and area tree
    States,
    /// Create or update a state
    CreateState {
        #[arg(short, long)]
        name: String,

        /// Short code, 2 to 5 characters
        #[arg(short, long)]
        id: String,

        /// Create the state disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a state
    DeleteState { state: String },
    /// Create or update a city within a state
    CreateCity {
        state: String,

        #[arg(short, long)]
        name: String,

        /// Short code, 2 to 5 characters
        #[arg(short, long)]
        id: String,

        #[arg(long, default_value_t = 0.0)]
        handling_charge: f64,

        #[arg(long, default_value_t = 0.0)]
        platform_charge: f64,

        #[arg(long)]
        inactive: bool,
    },
    /// Delete a city
    DeleteCity { state: String, city: String },
    /// Create or update a serviceable area within a city
    CreateArea {
        state: String,
        city: String,

        #[arg(short, long)]
        name: String,

        /// Short code, 2 to 5 characters
        #[arg(short, long)]
        id: String,

        /// 6-digit pincode
        #[arg(long)]
        pincode: String,

        #[arg(long)]
        inactive: bool,
    },
    /// Delete an area
    DeleteArea {
        state: String,
        city: String,
        area: String,
    },
}

#[derive(Subcommand)]
enum PackagesAction {
    /// List packages with their plans
    List,
    /// Create an empty package
    Create { name: String },
    /// Delete a package
    Delete { package: String },
    /// Add a validity plan to a package
    AddValidity {
        package: String,

        #[arg(long)]
        plan_id: u32,

        /// Validity in days
        #[arg(long)]
        validity: u32,
    },
    /// Add a sub plan to a validity plan
    AddSubplan {
        package: String,
        plan: String,

        #[arg(long)]
        sub_plan_id: u32,

        /// Garments covered
        #[arg(long)]
        clothes: u32,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value_t = 0.0)]
        discount_rate: f64,

        #[arg(long, default_value_t = 1)]
        pickups: u32,
    },
    /// Delete a validity plan
    DeleteValidity { package: String, plan: String },
    /// Delete a sub plan
    DeleteSubplan {
        package: String,
        plan: String,
        sub_plan: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging and error redaction follow the loaded client config, so a
    // `--config` file's environment applies to both.
    let app = App::new(cli.config.as_deref(), cli.format);
    let (telemetry, classifier) = match &app {
        Ok(app) => (app.telemetry(cli.verbose), *app.client.classifier()),
        Err(_) => {
            let telemetry = TelemetryConfig::from_env();
            let debug = cli.verbose || telemetry.debug_enabled;
            let classifier = ErrorClassifier::new(telemetry.environment);
            (telemetry.with_debug(debug), classifier)
        }
    };
    if let Err(e) = spinovo_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging unavailable: {e}"));
    }

    let result = match app {
        Ok(app) => {
            let config = app.client.config();
            debug!(base_url = %config.base_url, environment = %config.environment, "Client configured");
            dispatch(&app, cli.command).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {}",
                "Error:".if_supports_color(Stream::Stderr, |t| t.red().bold().to_string()),
                describe(&e, &classifier)
            );
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { mobile, password } => auth::login(app, &mobile, &password).await,
        Commands::Logout => auth::logout(app),
        Commands::Status => auth::status(app),
        Commands::Whoami => auth::whoami(app).await,
        Commands::Dashboard => dashboard::run(app).await,
        Commands::Customers { action } => match action {
            CustomersAction::List { page } => customers::list(app, page).await,
            CustomersAction::Show { id } => customers::show(app, &id).await,
        },
        Commands::Bookings { action } => match action {
            BookingsAction::List { page } => bookings::list(app, page).await,
            BookingsAction::Show { id } => bookings::show(app, &id).await,
            BookingsAction::Assign { booking, copilot } => {
                bookings::assign(app, &booking, &copilot).await
            }
        },
        Commands::Copilots { action } => match action {
            CopilotsAction::List { page } => copilots::list(app, page).await,
            CopilotsAction::Show { id } => copilots::show(app, &id).await,
            CopilotsAction::Create {
                name,
                mobile,
                password,
            } => copilots::create(app, &name, &mobile, &password).await,
        },
        Commands::Assignments { page } => assignments::list(app, page).await,
        Commands::Transactions { page } => transactions::list(app, page).await,
        Commands::Otp { page } => otp::list(app, page).await,
        Commands::Locations { action } => match action {
            LocationsAction::States => locations::states(app).await,
            LocationsAction::CreateState { name, id, inactive } => {
                locations::create_state(app, &name, &id, !inactive).await
            }
            LocationsAction::DeleteState { state } => locations::delete_state(app, &state).await,
            LocationsAction::CreateCity {
                state,
                name,
                id,
                handling_charge,
                platform_charge,
                inactive,
            } => {
                let city = locations::CityArgs {
                    name,
                    id,
                    handling_charge,
                    platform_charge,
                    active: !inactive,
                };
                locations::create_city(app, &state, city).await
            }
            LocationsAction::DeleteCity { state, city } => {
                locations::delete_city(app, &state, &city).await
            }
            LocationsAction::CreateArea {
                state,
                city,
                name,
                id,
                pincode,
                inactive,
            } => {
                let area = locations::AreaArgs {
                    name,
                    id,
                    pincode,
                    active: !inactive,
                };
                locations::create_area(app, &state, &city, area).await
            }
            LocationsAction::DeleteArea { state, city, area } => {
                locations::delete_area(app, &state, &city, &area).await
            }
        },
        Commands::Packages { action } => match action {
            PackagesAction::List => packages::list(app).await,
            PackagesAction::Create { name } => packages::create(app, &name).await,
            PackagesAction::Delete { package } => packages::delete(app, &package).await,
            PackagesAction::AddValidity {
                package,
                plan_id,
                validity,
            } => packages::add_validity(app, &package, plan_id, validity).await,
            PackagesAction::AddSubplan {
                package,
                plan,
                sub_plan_id,
                clothes,
                price,
                discount_rate,
                pickups,
            } => {
                let sub = spinovo_api_client::endpoints::packages::SubPlanRequest {
                    sub_plan_id,
                    clothes,
                    discount_rate,
                    prices: price,
                    no_of_pickups: pickups,
                };
                packages::add_sub_plan(app, &package, &plan, &sub).await
            }
            PackagesAction::DeleteValidity { package, plan } => {
                packages::delete_validity(app, &package, &plan).await
            }
            PackagesAction::DeleteSubplan {
                package,
                plan,
                sub_plan,
            } => packages::delete_sub_plan(app, &package, &plan, &sub_plan).await,
        },
    }
}

/// Operator-facing text for a failed command
fn describe(err: &anyhow::Error, classifier: &ErrorClassifier) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => classifier.user_message(app_err),
        None => format!("{err:#}"),
    }
}
