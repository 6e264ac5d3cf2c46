//! Ga Store - Main Entry Point
//!
//! Command line front end for the Ga tree and the weekly planner.
//! The actual implementation is in the `ga_store` library.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use ga_store::config::FileConfig;
use ga_store::formatting::{format_tree, format_week};
use ga_store::logging::init_logging;
use ga_store::week::local_date_today;
use ga_store::{CalendarStore, GaPath, RemoteBlob, SettingsSource, TreeStore};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Ga Store - goal tree and weekly planner kept in a JSON bin
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with endpoint, api_key, tree_bin_id, week_bin_id (defaults to environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with the Ga tree
    #[command(subcommand)]
    Tree(TreeCommand),
    /// Work with the weekly planner
    #[command(subcommand)]
    Week(WeekCommand),
}

#[derive(Subcommand, Debug)]
enum TreeCommand {
    /// Print the tree
    Show,
    /// Add a Ga and save the tree
    Add {
        name: String,
        /// Parent as a slash-separated chain of names (default: root)
        #[arg(long)]
        under: Option<String>,
        /// Position among the siblings (default: last)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Remove a Ga by name and save the tree
    Remove {
        name: String,
        /// Parent as a slash-separated chain of names (default: root)
        #[arg(long)]
        under: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum WeekCommand {
    /// Print the seven days of a week
    Show {
        /// Any date in the week, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// First day of the week (default: Monday)
        #[arg(long, value_parser = parse_weekday)]
        first_day: Option<Weekday>,
    },
    /// Set the text of one day and save the table
    Set {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,
        text: String,
        /// Any date in the week, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// First day of the week (default: Monday)
        #[arg(long, value_parser = parse_weekday)]
        first_day: Option<Weekday>,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')", s))
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("Invalid weekday '{}'. Use Monday..Sunday", s))
}

fn parent_path<T: ga_store::BlobTransport>(
    store: &TreeStore<T>,
    under: Option<&str>,
) -> Result<GaPath> {
    let Some(under) = under else {
        return Ok(GaPath::root());
    };
    let names: Vec<&str> = under
        .split('/')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    store
        .locate(names.as_slice())
        .with_context(|| format!("No Ga found at '{}'", under))
}

async fn run_tree(command: TreeCommand, config: Option<&FileConfig>) -> Result<()> {
    let source = config
        .map(FileConfig::tree_source)
        .unwrap_or_else(SettingsSource::tree_env);
    let mut store = TreeStore::with_remote(RemoteBlob::http(source));
    store
        .load_from_remote()
        .await
        .context("Failed to load Ga tree")?;

    // Edits only flag the tree as dirty; saving stays explicit.
    let dirty = Arc::new(AtomicBool::new(false));
    let flag = dirty.clone();
    store.register_observer(move |root| {
        info!("event=ga_changed module=cli nodes={}", root.count());
        flag.store(true, Ordering::SeqCst);
        Ok(())
    });

    match command {
        TreeCommand::Show => {}
        TreeCommand::Add { name, under, index } => {
            let parent = parent_path(&store, under.as_deref())?;
            store.insert_at(&name, &parent, index)?;
        }
        TreeCommand::Remove { name, under } => {
            let parent = parent_path(&store, under.as_deref())?;
            store.remove_named(&name, &parent)?;
        }
    }

    if dirty.load(Ordering::SeqCst) {
        store
            .save_to_remote()
            .await
            .context("Failed to save Ga tree")?;
    }
    print!("{}", format_tree(store.root()));
    Ok(())
}

async fn run_week(command: WeekCommand, config: Option<&FileConfig>) -> Result<()> {
    let source = config
        .map(FileConfig::week_source)
        .unwrap_or_else(SettingsSource::week_env);
    let configured_first_day = match config {
        Some(config) => config.first_day()?,
        None => None,
    };

    let mut store = CalendarStore::with_remote(RemoteBlob::http(source));
    store
        .load_from_remote()
        .await
        .context("Failed to load weeks")?;

    let (date, first_day) = match &command {
        WeekCommand::Show { date, first_day } | WeekCommand::Set { date, first_day, .. } => {
            (date.unwrap_or_else(local_date_today), first_day.or(configured_first_day))
        }
    };
    if let Some(day) = first_day {
        store.set_first_day_of_week(day);
    }

    if let WeekCommand::Set { day, text, .. } = command {
        store.set_day_text(day, text, Some(date));
        store
            .save_to_remote()
            .await
            .context("Failed to save weeks")?;
    }

    println!("Week {}", store.week_key(date));
    print!("{}", format_week(&store.week_of(date)));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = init_logging(args.log_level.as_deref())?;

    let file_config = args.config.as_ref().map(FileConfig::load).transpose()?;

    match args.command {
        Command::Tree(command) => run_tree(command, file_config.as_ref()).await,
        Command::Week(command) => run_week(command, file_config.as_ref()).await,
    }
}
