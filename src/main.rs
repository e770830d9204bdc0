mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rsvp_core::config::RsvpConfig;
use rsvp_core::export::ExportFormat;
use rsvp_core::{Response, Session, Store};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "Create events, invite guests and track who's coming")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log into it
    Signup {
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log in with an existing account
    Login {
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    Logout,
    /// Show who is logged in
    Whoami,
    /// List the events you host
    Events {
        /// Keep the list open and refresh it as responses come in
        #[arg(short, long)]
        watch: bool,
    },
    /// Create an event and invite guests
    New {
        title: String,

        /// Date and time, e.g. "2025-03-20T15:00"
        #[arg(short, long)]
        date: String,

        #[arg(short, long)]
        location: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Comma-separated guest emails
        #[arg(short, long)]
        guests: String,
    },
    /// Show an event with its guest list
    Show {
        id: String,

        /// Keep the view open and refresh it as responses come in
        #[arg(short, long)]
        watch: bool,
    },
    /// Record a guest's response
    Respond {
        id: String,

        /// Guest email, or the token from their invitation link
        guest: String,

        /// confirm or decline
        response: Response,
    },
    /// Print invitation links for every guest
    Invite {
        id: String,

        /// Only guests who haven't answered yet
        #[arg(short, long)]
        reminder: bool,
    },
    /// Export the guest list, a printable report or a calendar invite
    Export {
        id: String,

        /// csv, report or ics
        format: ExportFormat,

        /// Defaults to a file name derived from the event title
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Show the effective configuration, or change one option
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save an option to the config file (data_dir, poll_interval_secs, base_url)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = RsvpConfig::load()?;
    tracing::debug!(data_dir = %config.data_path().display(), "Loaded config");
    let store = Store::from_config(&config);
    let session = Session::restore(store);
    let mut ctx = Context { config, session };

    match cli.command {
        Commands::Signup { email, password } => commands::auth::signup(&mut ctx, &email, password),
        Commands::Login { email, password } => commands::auth::login(&mut ctx, &email, password),
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Events { watch } => commands::events::run(&ctx, watch).await,
        Commands::New {
            title,
            date,
            location,
            description,
            guests,
        } => commands::new::run(&ctx, title, date, location, description, &guests),
        Commands::Show { id, watch } => commands::show::run(&ctx, &id, watch).await,
        Commands::Respond {
            id,
            guest,
            response,
        } => commands::respond::run(&ctx, &id, &guest, response),
        Commands::Invite { id, reminder } => commands::invite::run(&ctx, &id, reminder),
        Commands::Export { id, format, output } => {
            commands::export::run(&ctx, &id, format, output)
        }
        Commands::Config { action: None } => commands::config::show(&ctx),
        Commands::Config {
            action: Some(ConfigAction::Set { key, value }),
        } => commands::config::set(&key, &value),
    }
}

/// Log to stderr so command output stays clean. Level comes from `RSVP_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RSVP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
