//! pollbox - classroom polls from the terminal.
//!
//! A tutor creates single-question multiple-choice polls; students
//! respond once each. All state lives in a local key-value store, so
//! sessions survive between invocations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pollbox_common::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// pollbox - classroom polling over a local store
#[derive(Parser, Debug)]
#[command(name = "pollbox")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Session ===
    /// Sign in with a roll number or email
    Login {
        /// Roll number (1-61) or email, or "tutor"
        identifier: String,
        /// Account password
        password: String,
    },

    /// Forget the active session
    Logout,

    /// Show the signed-in user
    Whoami,

    // === Account ===
    /// Complete first-login setup (students)
    Setup {
        /// Full display name
        name: String,
        /// New password (at least 6 characters)
        password: String,
    },

    /// Change the password of the signed-in user
    Passwd {
        /// Current password
        current: String,
        /// New password (at least 6 characters)
        new: String,
    },

    // === Polls ===
    /// List polls with your response status
    Polls,

    /// Submit a response to a poll
    Submit {
        /// Poll ID
        poll_id: String,
        /// Chosen option, exactly as listed
        option: String,
    },

    /// Manage polls (tutor only)
    #[command(subcommand)]
    Poll(PollCommands),
}

#[derive(Subcommand, Debug)]
enum PollCommands {
    /// Create a poll
    Create {
        /// Poll question
        #[arg(short, long)]
        question: String,
        /// Answer option (repeat 2 to 5 times)
        #[arg(short, long = "option")]
        options: Vec<String>,
    },

    /// List all polls with response counts
    List,

    /// Delete a poll and its responses
    Delete {
        /// Poll ID
        poll_id: String,
    },

    /// Show results for a poll
    Results {
        /// Poll ID
        poll_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pollbox={}", cli.log_level))),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let app = commands::App::open(&config)?;

    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => commands::auth::login(&app, &identifier, &password)?,
        Commands::Logout => commands::auth::logout(&app)?,
        Commands::Whoami => commands::auth::whoami(&app)?,
        Commands::Setup { name, password } => commands::auth::setup(&app, name, password)?,
        Commands::Passwd { current, new } => commands::auth::passwd(&app, current, new)?,
        Commands::Polls => commands::polls::overview(&app)?,
        Commands::Submit { poll_id, option } => commands::polls::submit(&app, &poll_id, option)?,
        Commands::Poll(command) => match command {
            PollCommands::Create { question, options } => {
                commands::polls::create(&app, question, options)?;
            }
            PollCommands::List => commands::polls::list(&app)?,
            PollCommands::Delete { poll_id } => commands::polls::delete(&app, &poll_id)?,
            PollCommands::Results { poll_id } => commands::polls::results(&app, &poll_id)?,
        },
    }

    app.flush()?;
    Ok(())
}
