//! Focus API server and admin CLI
//!
//! Running without a subcommand starts the HTTP API. Subcommands manage users
//! and intervals directly against the database, bypassing the server.

mod config;
mod intervals;
mod routes;
mod store;
mod users;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use store::Store;
use users::NewUser;

/// Default config file path
const CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(name = "focus-api")]
#[command(about = "HTTP API and admin CLI for the Focus time tracker")]
struct Args {
    /// Data directory for the database
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Listen address (overrides config.toml)
    #[arg(long)]
    listen: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Inspect and export tracked intervals
    Intervals {
        #[command(subcommand)]
        action: IntervalsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// List all users
    List,

    /// Add a new user
    Add {
        /// Display name
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// IANA timezone name (e.g. "America/Los_Angeles")
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },

    /// Delete a user by ID (their intervals go with them)
    Delete {
        /// User ID to delete
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum IntervalsCommand {
    /// List a user's completed intervals
    List {
        /// User ID
        #[arg(long)]
        user: i64,
    },

    /// Export a user's completed intervals to CSV
    Export {
        /// User ID
        #[arg(long)]
        user: i64,

        /// Path to output CSV file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    std::fs::create_dir_all(&args.data_dir)?;
    let db_path = args.data_dir.join(store::DB_FILENAME);
    let store = Store::open(&db_path).await?;

    if let Some(command) = args.command {
        return handle_command(command, &store).await;
    }

    serve(args, store).await
}

/// Start the HTTP API
async fn serve(args: Args, store: Store) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focus_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let file_config = config::FileConfig::load_or_default(std::path::Path::new(CONFIG_FILE))?;
    let config = config::Config::from_file(&file_config, args.listen);

    let stats = store.stats().await?;
    tracing::info!("Database: {}", stats);

    let app = routes::create_router(routes::AppState::new(store));

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle admin subcommands
async fn handle_command(command: Command, store: &Store) -> Result<()> {
    match command {
        Command::User { action } => handle_user_command(action, store).await,
        Command::Intervals { action } => handle_intervals_command(action, store).await,
    }
}

/// Handle user subcommands
async fn handle_user_command(action: UserCommand, store: &Store) -> Result<()> {
    match action {
        UserCommand::List => {
            let users = store.list_users().await?;
            if users.is_empty() {
                println!("No users yet.");
                println!("\nUse 'focus-api user add' to create one");
            } else {
                println!(
                    "{:<4} {:<16} {:<28} Timezone",
                    "ID", "Username", "Email"
                );
                println!("{}", "-".repeat(70));
                for user in &users {
                    println!(
                        "{:<4} {:<16} {:<28} {}",
                        user.id,
                        truncate(&user.username, 15),
                        truncate(&user.email, 27),
                        user.timezone,
                    );
                }
                println!("\n{} user(s)", users.len());
            }
            Ok(())
        }

        UserCommand::Add {
            username,
            email,
            timezone,
        } => {
            let user = NewUser {
                username,
                email,
                timezone,
            };
            let id = store.create_user(&user).await?;
            println!("Added user #{}: {}", id, user.username);
            Ok(())
        }

        UserCommand::Delete { id } => {
            if store.delete_user(id).await? {
                println!("Deleted user #{}", id);
            } else {
                println!("User #{} not found", id);
            }
            Ok(())
        }
    }
}

/// Handle intervals subcommands
async fn handle_intervals_command(action: IntervalsCommand, store: &Store) -> Result<()> {
    match action {
        IntervalsCommand::List { user } => {
            let finished = store.finished_intervals(user).await?;
            if finished.is_empty() {
                println!("No completed intervals for user #{}.", user);
            } else {
                println!(
                    "{:<6} {:<24} {:<22} {:>8}",
                    "ID", "Name", "Started", "Hours"
                );
                println!("{}", "-".repeat(66));
                for interval in &finished {
                    let id = interval.id.map(|i| i.to_string()).unwrap_or_default();
                    println!(
                        "{:<6} {:<24} {:<22} {:>8.2}",
                        id,
                        truncate(&interval.name, 23),
                        interval.start_time.format("%Y-%m-%d %H:%M:%S"),
                        interval.hours(),
                    );
                }
                println!("{}", "-".repeat(66));
                println!(
                    "{:<6} {:<24} {:<22} {:>8.2}",
                    "Total",
                    "",
                    "",
                    intervals::total_tracked_hours(&finished)
                );
                println!("\n{} interval(s)", finished.len());
            }
            Ok(())
        }

        IntervalsCommand::Export { user, file } => {
            let finished = store.finished_intervals(user).await?;
            intervals::export_to_csv(&finished, &file)?;
            println!(
                "Exported {} intervals to {}",
                finished.len(),
                file.display()
            );
            Ok(())
        }
    }
}

/// Truncate string for display, cutting on a char boundary
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= keep)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("dana", 15), "dana");
        assert_eq!(truncate("", 15), "");
    }

    #[test]
    fn test_truncate_cuts_long_ascii() {
        assert_eq!(truncate("abcdefghijklmnop", 10), "abcdefg...");
    }

    #[test]
    fn test_truncate_multibyte_username() {
        // The 'ü' spans bytes 11..13, straddling the naive cut at byte 12
        assert_eq!(truncate("aaaaaaaaaaaüdienstbüro", 15), "aaaaaaaaaaa...");
        assert_eq!(truncate("büro und dienstreisen", 10), "büro u...");
    }
}
