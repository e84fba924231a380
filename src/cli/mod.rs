//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{Settings, StorePaths};
use crate::errors::{Result, SquirrelError};
use crate::session::Session;
use crate::vault::EntryStore;

/// Minimum master password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable read for the master password (CI/scripting).
pub const PASSWORD_ENV: &str = "SQUIRREL_PASSWORD";

/// Squirrel CLI: local encrypted password store.
#[derive(Parser)]
#[command(
    name = "squirrel",
    about = "Local encrypted password store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (overrides `store_dir` in .squirrel.toml)
    #[arg(long, global = true)]
    pub dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new store and choose the master password
    Init,

    /// Add a new entry
    #[command(visible_aliases = ["new", "create"])]
    Add {
        /// Entry title (stored unencrypted)
        title: String,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Show one entry
    Show {
        /// Entry ID
        id: i64,
        /// Print the password in clear text
        #[arg(short, long)]
        reveal: bool,
    },

    /// List entries
    #[command(visible_alias = "ls")]
    List {
        /// Sort order (`title` or `username`), or a limit
        order: Option<String>,
        /// Maximum number of entries to show
        limit: Option<usize>,
    },

    /// Edit an entry (fields not given are kept)
    Edit {
        /// Entry ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete an entry
    #[command(visible_aliases = ["del", "remove"])]
    Delete {
        /// Entry ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show entry count and last ID
    Status {
        /// Rescan the data file and rewrite the cached snapshot
        #[arg(long)]
        refresh: bool,
    },

    /// Show version
    Version,
}

/// Optional entry fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct EntryFields {
    /// Username
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (prompted for when omitted on a terminal)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Address, e.g. a URL
    #[arg(short, long)]
    pub address: Option<String>,
    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Working directory, settings, and resolved store paths.
pub struct Context {
    pub settings: Settings,
    pub paths: StorePaths,
}

impl Context {
    /// Load settings from the current directory and apply `--dir`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut settings = Settings::load(&cwd)?;
        if let Some(dir) = &cli.dir {
            settings.store_dir = dir.clone();
        }
        let paths = settings.store_paths(&cwd);
        Ok(Self { settings, paths })
    }

    pub fn store(&self) -> EntryStore {
        self.settings.entry_store(&self.paths)
    }

    /// Prompt for the master password and unlock the store.
    pub fn unlock(&self) -> Result<Session> {
        if !crate::vault::has_verification(&self.paths.verification) {
            return Err(SquirrelError::StoreNotInitialized(self.paths.dir.clone()));
        }
        let password = prompt_password()?;
        Session::unlock(&self.paths, password.as_bytes())
    }
}

/// Get the master password, trying in order:
/// 1. `SQUIRREL_PASSWORD` env var
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter password")
        .interact()
        .map_err(|e| SquirrelError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `SQUIRREL_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            check_password_len(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Master password")
            .with_confirmation("Verify password", "Password did not match! Try again.")
            .interact()
            .map_err(|e| SquirrelError::CommandFailed(format!("password prompt: {e}")))?;

        if let Err(e) = check_password_len(&password) {
            output::warning(&e.to_string());
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn check_password_len(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SquirrelError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolve the `list` arguments.  A single argument may be either an
/// order name or a limit.
pub fn parse_list_args(
    order: Option<&str>,
    limit: Option<usize>,
    settings: &Settings,
) -> Result<(crate::vault::Order, usize)> {
    let default_limit = settings.list_limit;
    match (order, limit) {
        (None, _) => Ok((settings.default_order()?, limit.unwrap_or(default_limit))),
        (Some(arg), None) => match arg.parse::<usize>() {
            Ok(n) => Ok((settings.default_order()?, n)),
            Err(_) => Ok((arg.parse()?, default_limit)),
        },
        (Some(arg), Some(n)) => Ok((arg.parse()?, n)),
    }
}
