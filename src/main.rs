//! Destiny Dice: command-line front end.
//!
//! Every invocation opens the database, applies one command and exits.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use destiny_dice::app::{resolve_database_path, App};
use destiny_dice::logging;
use destiny_dice::managers::destiny_manager::DestinyManagerTrait;
use destiny_dice::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use destiny_dice::types::destiny::HistorySize;
use destiny_dice::types::errors::DestinyError;

/// Keep a list of destinies and let the dice pick one
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (default: $DESTINY_DICE_DATA_DIR, settings, then the platform data dir)
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    /// Settings file (default: settings.json in the platform config dir)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new destiny
    Add {
        /// Text of the destiny
        text: String,
    },
    /// Change the text of a destiny
    Edit {
        /// ID of the destiny to edit
        id: String,
        /// New text
        text: String,
    },
    /// Remove a destiny
    Remove {
        /// ID of the destiny to remove
        id: String,
    },
    /// List all destinies, newest first
    List,
    /// Roll the dice of destiny
    Roll,
    /// Show the selection history
    History {
        /// Show every stored entry instead of the configured number
        #[arg(long)]
        all: bool,
    },
    /// Show or change how many history entries are kept
    Size {
        /// One of 3, 5, 7, 10, 15, 20
        size: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings_engine = SettingsEngine::new(cli.config.clone());
    let settings = match settings_engine.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("warning: {}, using default settings", e);
            Default::default()
        }
    };
    logging::init(&settings.logging.level, cli.verbose);

    let db_path = resolve_database_path(cli.db.clone(), &settings);
    let mut app = match App::new(&db_path) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(path = %db_path.display(), "failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("⚠️  {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(app: &mut App, command: Commands) -> Result<(), DestinyError> {
    let mgr = &mut app.manager;
    match command {
        Commands::Add { text } => {
            let destiny = mgr.add_destiny(&text)?;
            println!("Added \"{}\" ({})", destiny.text, destiny.id);
        }
        Commands::Edit { id, text } => {
            let destiny = mgr.edit_destiny(&id, &text)?;
            println!("Updated \"{}\" ({})", destiny.text, destiny.timestamp_label());
        }
        Commands::Remove { id } => {
            if mgr.remove_destiny(&id) {
                println!("Removed {}", id);
            } else {
                println!("Nothing to remove for {}", id);
            }
        }
        Commands::List => {
            let list = app.list_view();
            if list.is_empty() {
                println!("No items in the destiny pool yet! Add some items to get started.");
            }
            for row in list.rows() {
                println!("{}  {}", row.id, row.text);
                println!("    {}", row.label);
            }
            println!("Total destinies: {}", list.total());
        }
        Commands::Roll => {
            let picked = mgr.select_random()?;
            println!("🎉 Your Destiny is 🎉");
            println!();
            println!("    {}", picked.text());
            println!();
        }
        Commands::History { all } => {
            let entries = if all { mgr.history() } else { mgr.visible_history() };
            for (i, entry) in entries.iter().enumerate() {
                let latest = if i == 0 { "  [Latest]" } else { "" };
                println!("{}  {}{}", entry.selected_time(), entry.text(), latest);
            }
            println!("Storing last {} rolls in history", mgr.history_size());
        }
        Commands::Size { size: Some(size) } => {
            mgr.set_history_size(size)?;
            println!("History size set to {}", size);
        }
        Commands::Size { size: None } => {
            let options: Vec<String> = HistorySize::options().map(|s| s.to_string()).collect();
            println!("History size: {} (options: {})", mgr.history_size(), options.join(", "));
        }
    }
    Ok(())
}
