//! `squirrel add`: encrypt and store a new entry.

use std::io::{self, IsTerminal, Read};

use crate::cli::commands::refresh_snapshot;
use crate::cli::output;
use crate::cli::{Cli, Context, EntryFields};
use crate::errors::{Result, SquirrelError};
use crate::vault::NewEntry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, title: &str, fields: &EntryFields) -> Result<()> {
    if title.trim().is_empty() {
        return Err(SquirrelError::CommandFailed("title cannot be empty".into()));
    }

    let ctx = Context::load(cli)?;
    let session = ctx.unlock()?;

    let new = NewEntry {
        title: title.to_string(),
        username: fields.username.clone().unwrap_or_default(),
        password: read_entry_password(fields.password.as_deref())?,
        address: fields.address.clone().unwrap_or_default(),
        notes: fields.notes.clone().unwrap_or_default(),
    };

    // New IDs are always one past the largest ID on disk.
    let mut store = ctx.store();
    let id = next_id(store.largest_id()?)?;
    let entry = session.seal(id, &new)?;
    store.insert(&entry)?;

    let snapshot = refresh_snapshot(&ctx, &store)?;
    output::success(&format!(
        "Entry '{title}' saved with ID {id} ({} total)",
        snapshot.count
    ));

    Ok(())
}

/// Determine the entry password from one of three sources.
fn read_entry_password(inline: Option<&str>) -> Result<String> {
    if let Some(v) = inline {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        Ok(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt, empty allowed.
        dialoguer::Password::new()
            .with_prompt("Password (optional)")
            .with_confirmation("Verify password", "Password did not match! Try again.")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| SquirrelError::CommandFailed(format!("input prompt: {e}")))
    }
}

/// One past `largest`, or an error once the ID space is used up.
fn next_id(largest: i64) -> Result<i64> {
    largest
        .checked_add(1)
        .ok_or_else(|| SquirrelError::CommandFailed(format!("no IDs left after {largest}")))
}
