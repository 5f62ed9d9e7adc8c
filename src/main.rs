//! # Taskdue
//!
//! A deadline-centric task manager for the terminal. Taskdue combines a fast CLI for quick entry with a TUI (Terminal User Interface) whose task list keeps a live "time remaining / overdue" readout per task.
//!
//! ## Features
//!
//! *   **Live Deadlines**: Every task with a deadline shows how long is left (or how late it is) plus how much of its time window has elapsed, refreshed once a minute.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive view with pending/completed tabs and a progress gauge.
//! *   **Bulk Actions**: Complete or delete several tasks at once, from the CLI (multiple IDs) or the TUI (marks).
//! *   **Suggestions**: Previously used task texts are ranked and offered back when you search.
//! *   **Data Persistence**: Tasks are stored in standard XDG data directories (JSON format).
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Simply run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! taskdue
//! # or explicitly
//! taskdue ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `j`/`k` or arrows: Move selection
//! *   `a`: Add new task
//! *   `Space`: Complete marked tasks (or the highlighted one)
//! *   `d`: Delete marked tasks (or the highlighted one)
//! *   `x`: Mark/unmark the highlighted task
//! *   `X`: Mark all / clear marks
//! *   `e`: Edit description
//! *   `t`: Edit deadline
//! *   `c`: Switch between Pending and Completed views
//!
//! ### Command Line Interface (CLI)
//!
//! **Adding Tasks**
//! ```bash
//! # With a deadline
//! taskdue add "Write report" --due "2026-09-01 17:30"
//!
//! # Date only (due at the end of that day)
//! taskdue add "Pay rent" --due 2026-09-01
//!
//! # No deadline
//! taskdue add "Read the style guide"
//! ```
//!
//! **Managing Tasks**
//! ```bash
//! # List pending tasks (nearest deadline first)
//! taskdue list
//!
//! # List all (including completed)
//! taskdue list --all
//!
//! # Completed tasks, newest first
//! taskdue history
//!
//! # Complete one or more tasks
//! taskdue complete 3 5 8
//!
//! # Remove one or more tasks
//! taskdue remove 2 4
//!
//! # Change a deadline, or drop it
//! taskdue edit 3 --due "2026-09-02 09:00"
//! taskdue edit 3 --no-due
//! ```
//!
//! **Suggestions**
//! ```bash
//! taskdue suggest "write"
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/taskdue/tasks.json`
//! *   macOS: `~/Library/Application Support/taskdue/tasks.json`
//! *   Windows: `%APPDATA%\taskdue\tasks.json`
//!
//! You can override this by setting the `TASKDUE_DB` environment variable.
//!
//! ## Time Display
//!
//! The "Time Left" column is recomputed from the deadline on every render:
//! `"2d 3h 10m left"` while time remains, `"Late by 1d 4h"` once the
//! deadline has passed (a task exactly at its deadline counts as late).
//! Progress is the elapsed fraction of the window between creation and
//! deadline.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use taskdue::commands::*;
use taskdue::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskdue")]
#[command(about = "Deadline-centric terminal task manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        text: String,
        /// Deadline, e.g. "2026-09-01 17:30" or 2026-09-01
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List pending tasks, nearest deadline first
    List {
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
    },
    /// Show completed tasks, newest first
    History,
    /// Mark one or more tasks as complete
    Complete {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Remove one or more tasks
    Remove {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Edit a task
    Edit {
        id: u64,
        /// New task description
        #[arg(short, long)]
        text: Option<String>,
        /// New deadline
        #[arg(short, long)]
        due: Option<String>,
        /// Clear the deadline
        #[arg(long)]
        no_due: bool,
    },
    /// Look up suggestions for a task text
    Suggest {
        query: String,
    },
    /// Reset the database (delete all tasks and suggestions)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { text, due }) => cmd_add(text, due, false),
        Some(Commands::List { all }) => cmd_list(all),
        Some(Commands::History) => cmd_history(),
        Some(Commands::Complete { ids }) => cmd_complete(&ids, false),
        Some(Commands::Remove { ids }) => cmd_remove(&ids, false),
        Some(Commands::Edit { id, text, due, no_due }) => cmd_edit(id, text, due, no_due, false),
        Some(Commands::Suggest { query }) => cmd_suggest(query),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskdue", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
