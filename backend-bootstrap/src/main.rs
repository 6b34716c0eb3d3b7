mod commands;
mod context;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "Rollcall attendance verification engine", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a new event record into the store
    CreateEvent(commands::CreateEventArgs),
    /// Issue the QR token payload for an event
    IssueToken {
        /// Event id to issue the token for
        event_id: String,
    },
    /// Validate a scanned QR payload and record attendance
    Scan(commands::ScanArgs),
    /// List recorded attendance for an event
    Attendees {
        /// Event id to list attendance for
        event_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("ROLLCALL_CONFIG", config);
    }

    match args.command {
        Command::CreateEvent(create_args) => commands::create_event(create_args).await,
        Command::IssueToken { event_id } => commands::issue_token(&event_id).await,
        Command::Scan(scan_args) => commands::scan(scan_args).await,
        Command::Attendees { event_id } => commands::attendees(&event_id).await,
    }
}
