//! `squirrel init`: create a new store and its master password.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::{Result, SquirrelError};
use crate::session::Session;
use crate::vault::has_verification;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    // 1. Refuse to overwrite an existing verification artifact.
    if has_verification(&ctx.paths.verification) {
        output::tip("Use `squirrel add <TITLE>` to add entries to the existing store.");
        return Err(SquirrelError::StoreAlreadyInitialized(ctx.paths.dir.clone()));
    }

    output::warning(
        "Without this password your data cannot be recovered, and there is no way to reset it.",
    );

    // 2. Prompt for a new password (with confirmation).
    let password = prompt_new_password()?;

    // 3. Derive the key and write the verification file.
    Session::initialize(&ctx.paths, password.as_bytes())?;

    output::success(&format!(
        "Store initialized at {}",
        ctx.paths.dir.display()
    ));
    output::tip("Run `squirrel add <TITLE>` to add an entry.");
    output::tip("Run `squirrel list` to see all entries.");

    Ok(())
}
