mod commands;
mod render;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use confsched_core::config::{ScheduleConfig, StoreConfig};
use confsched_core::store::{EventStore, MemoryStore, RestStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confsched")]
#[command(about = "Edit the conference schedule stored in your hosted event table")]
struct Cli {
    /// Use a throwaway in-memory store instead of the hosted table
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every event
    List,
    /// Add an event on a conference day
    Add {
        /// Event title
        title: String,

        /// Conference day (Monday..Friday)
        #[arg(short, long)]
        day: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: String,

        /// Display colour (e.g. "#4a90e2")
        #[arg(short, long)]
        colour: Option<String>,
    },
    /// Delete an event by id
    Delete {
        id: String,
    },
    /// Move or resize an event, as a calendar drag would
    Move {
        id: String,

        /// New start (e.g. "2025-12-01T10:00" or an RFC 3339 instant)
        #[arg(short, long)]
        start: String,

        /// New end
        #[arg(short, long)]
        end: String,

        /// Title to show in the confirmation
        #[arg(short, long, default_value = "")]
        title: String,
    },
    /// Print the effective configuration
    Config,
    /// Open the schedule page served by confsched-server
    Open {
        /// Open the edit page instead
        #[arg(long)]
        edit: bool,
    },
    /// Show which text colour is used on a background colour
    Contrast {
        colour: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let ctx = StoreContext::open(cli.memory)?;
            commands::list::run(ctx.store()).await
        }
        Commands::Add {
            title,
            day,
            start,
            end,
            colour,
        } => {
            let ctx = StoreContext::open(cli.memory)?;
            let form = confsched_core::form::AddEventForm {
                title,
                day,
                start_time: start,
                end_time: end,
                colour,
            };
            commands::add::run(ctx.store(), &ctx.config, form).await
        }
        Commands::Delete { id } => {
            let ctx = StoreContext::open(cli.memory)?;
            commands::delete::run(ctx.store(), &id).await
        }
        Commands::Move {
            id,
            start,
            end,
            title,
        } => {
            let ctx = StoreContext::open(cli.memory)?;
            commands::reschedule::run(ctx.store(), &id, &title, &start, &end).await
        }
        Commands::Config => commands::config::run(),
        Commands::Open { edit } => commands::open::run(edit),
        Commands::Contrast { colour } => commands::contrast::run(&colour),
    }
}

/// Settings plus the store the event commands work against.
struct StoreContext {
    config: ScheduleConfig,
    store: Arc<dyn EventStore>,
}

impl StoreContext {
    fn open(memory: bool) -> Result<Self> {
        let config = ScheduleConfig::load()?;

        let store: Arc<dyn EventStore> = if memory {
            tracing::info!("using in-memory store; nothing will be saved");
            Arc::new(MemoryStore::new())
        } else {
            let store_config = StoreConfig::from_env()?;
            Arc::new(RestStore::new(&store_config, &config.store)?)
        };

        Ok(StoreContext { config, store })
    }

    fn store(&self) -> &dyn EventStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_memory_flag_works_after_subcommand() {
        let cli = Cli::try_parse_from(["confsched", "list", "--memory"]).unwrap();
        assert!(cli.memory);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_offline_commands_parse() {
        let cli = Cli::try_parse_from(["confsched", "contrast", "#000000"]).unwrap();
        assert!(matches!(cli.command, Commands::Contrast { colour } if colour == "#000000"));

        let cli = Cli::try_parse_from(["confsched", "open", "--edit"]).unwrap();
        assert!(matches!(cli.command, Commands::Open { edit: true }));
    }

    #[test]
    fn test_move_parses_times() {
        let cli = Cli::try_parse_from([
            "confsched",
            "move",
            "7",
            "--start",
            "2025-12-01T10:00",
            "--end",
            "2025-12-01T11:00",
        ])
        .unwrap();

        match cli.command {
            Commands::Move { id, start, title, .. } => {
                assert_eq!(id, "7");
                assert_eq!(start, "2025-12-01T10:00");
                assert_eq!(title, "");
            }
            _ => panic!("expected move"),
        }
    }
}
