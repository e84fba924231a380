//! `squirrel delete`: remove an entry from the store.

use dialoguer::Confirm;

use crate::cli::commands::refresh_snapshot;
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{Result, SquirrelError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let ctx = Context::load(cli)?;

    // Unlock first so a wrong password never reaches the data file.
    let _session = ctx.unlock()?;
    let mut store = ctx.store();
    let entry = store.load(id)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry {id} '{}'?", entry.title))
            .default(false)
            .interact()
            .map_err(|e| SquirrelError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id)?;
    let snapshot = refresh_snapshot(&ctx, &store)?;

    output::success(&format!(
        "Deleted entry {id} '{}' ({} left)",
        entry.title, snapshot.count
    ));
    Ok(())
}
