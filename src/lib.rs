//! Yanggang library crate
//!
//! This crate provides the core functionality for the `yanggang` CLI, a small
//! tool for the shop's two daily entries: the tasting-service feedback line
//! (which short-dated yanggang flavors are out for sampling) and the sales
//! figure. It is organized into small modules:
//!
//! - `options`: the closed set of flavor/ingredient options and their labels.
//! - `selection`: the on/off state over those options.
//! - `report`: title line, feedback report and sales report formatting.
//! - `clipboard`: native clipboard with a copy-utility fallback, plus the
//!   transient "copied" indicator.
//! - `session`: form sessions, the submit handler and the two-tab app state.
//! - `interactive`: the line-oriented front end over the sessions.
//!
//! The binary `src/main.rs` calls `yanggang_lib::run()` to execute the CLI.

pub mod clipboard;
pub mod error;
pub mod interactive;
pub mod options;
pub mod report;
pub mod selection;
pub mod session;

use std::io;
use std::time::Instant;

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::options::OptionKey;
use crate::report::{DEFAULT_STORE, parse_timestamp};
use crate::selection::SelectionState;
use crate::session::{App, FeedbackSession, SalesSession, SubmitHandler};

pub use crate::error::Error;

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tasting-service report for the selected options
    Report {
        /// Options to select: key, Korean label or number (comma separated)
        #[arg(short = 's', long = "select", value_delimiter = ',')]
        select: Vec<OptionKey>,

        /// Store name shown in the title line
        #[arg(long = "store", env = "YANGGANG_STORE", default_value = DEFAULT_STORE)]
        store: String,

        /// Use this time instead of now ("YYYY-MM-DD HH:MM")
        #[arg(long = "at")]
        at: Option<String>,

        /// Copy the report to clipboard
        #[arg(long = "clipboard", action = ArgAction::SetTrue)]
        clipboard: bool,

        /// Also print the submitted selection as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Print the daily sales report
    Sales {
        /// Sales amount in won (digit grouping and a trailing 원 are accepted)
        #[arg(short = 'a', long = "amount")]
        amount: Option<String>,

        /// Optional note appended to the report
        #[arg(long = "note")]
        note: Option<String>,

        #[arg(long = "store", env = "YANGGANG_STORE", default_value = DEFAULT_STORE)]
        store: String,

        #[arg(long = "at")]
        at: Option<String>,

        /// Copy the report to clipboard
        #[arg(long = "clipboard", action = ArgAction::SetTrue)]
        clipboard: bool,
    },
    /// List the available options
    Options,
    /// Interactive feedback/sales session on stdin
    Interactive {
        #[arg(long = "store", env = "YANGGANG_STORE", default_value = DEFAULT_STORE)]
        store: String,
    },
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` selects the level (default: info, so submissions without a
/// handler show up). Logs never go to stdout, which carries only reports.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Run the Yanggang CLI.
///
/// This function is the high-level entrypoint used by the `yanggang` binary.
/// It parses CLI arguments and dispatches to module functions. Errors are
/// printed to stderr and cause the process to exit with a non-zero code.
///
/// Behavior summary:
/// - `report`: format the tasting-service line for the selected options and
///   optionally copy it to the clipboard.
/// - `sales`: format the sales line for an amount.
/// - `options`: list option numbers, keys and labels.
/// - `interactive`: toggle/submit/copy from stdin with two tabs.
///
/// Example:
///
/// ```no_run
/// yanggang_lib::run(); // called from src/main.rs
/// ```
pub fn run() {
    let cli = Cli::parse();
    init_tracing();
    if let Err(e) = execute(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Report {
            select,
            store,
            at,
            clipboard,
            json,
        } => {
            let at = resolve_time(at.as_deref())?;
            let handler = if json {
                SubmitHandler::callback(|state: &SelectionState| {
                    match serde_json::to_string(state) {
                        Ok(payload) => println!("{}", payload),
                        Err(e) => tracing::warn!(error = %e, "payload serialization failed"),
                    }
                })
            } else {
                SubmitHandler::Log
            };
            let mut session = FeedbackSession::new(store, handler);
            for key in SelectionState::from_selected(select).selected() {
                session.toggle(key);
            }
            println!("{}", session.submit_at(&at));

            if clipboard {
                report_copy(session.copy_last(&mut Clipboard::oneshot(), Instant::now()));
            }
        }
        Commands::Sales {
            amount,
            note,
            store,
            at,
            clipboard,
        } => {
            let at = resolve_time(at.as_deref())?;
            let mut session = SalesSession::new(store);
            session.set_amount(amount.as_deref().unwrap_or(""))?;
            if let Some(note) = note {
                session.set_note(&note);
            }
            println!("{}", session.submit_at(&at)?);

            if clipboard {
                report_copy(session.copy_last(&mut Clipboard::oneshot(), Instant::now()));
            }
        }
        Commands::Options => {
            for (i, k) in OptionKey::ALL.iter().enumerate() {
                println!("{:>2}  {:<15} {}", i + 1, k.key(), k.label());
            }
        }
        Commands::Interactive { store } => {
            let mut app = App::new(store, || SubmitHandler::Log);
            let mut clipboard = Clipboard::system();
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            interactive::run_session(&mut app, &mut clipboard, stdin.lock(), &mut stdout)?;
        }
    }
    Ok(())
}

fn resolve_time(at: Option<&str>) -> Result<NaiveDateTime> {
    match at {
        Some(s) => parse_timestamp(s),
        None => Ok(report::now()),
    }
}

/// Clipboard trouble is a warning; the report is already on stdout.
fn report_copy(result: Result<bool>) {
    match result {
        Ok(true) => eprintln!("복사됨"),
        Ok(false) => {}
        Err(e) => eprintln!("warning: failed to copy to clipboard: {}", e),
    }
}
