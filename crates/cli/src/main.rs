//! Hotel Desk CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! hotel-cli migrate
//!
//! # Create the order counter and the default staff accounts
//! hotel-cli seed
//!
//! # Create a staff user
//! hotel-cli user create -u priya -p 's3cret' -r cashier -n "Priya"
//!
//! # Show recent login attempts for a user
//! hotel-cli user logins -u priya -l 20
//!
//! # Show the order counter
//! hotel-cli counter show
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Idempotent first-run data
//! - `user create` / `user logins` - Manage staff users
//! - `counter show` - Inspect the order number sequence

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hotel-cli")]
#[command(author, version, about = "Hotel Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create the order counter and default staff accounts if missing
    Seed,
    /// Manage staff users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect counters
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new staff user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Plain-text password (stored as an argon2 hash)
        #[arg(short, long)]
        password: String,

        /// Role (`admin`, `cashier`)
        #[arg(short, long, default_value = "cashier")]
        role: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show the most recent login attempts for a username
    Logins {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum CounterAction {
    /// Print the current order sequence and the next order number
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                password,
                role,
                name,
            } => {
                commands::user::create_user(&username, &password, &role, name.as_deref()).await?;
            }
            UserAction::Logins { username, limit } => {
                commands::user::recent_logins(&username, limit).await?;
            }
        },
        Commands::Counter { action } => match action {
            CounterAction::Show => commands::counter::show().await?,
        },
    }
    Ok(())
}
