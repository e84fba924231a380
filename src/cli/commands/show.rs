//! `squirrel show`: decrypt and print one entry.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64, reveal: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let session = ctx.unlock()?;

    let entry = ctx.store().load(id)?;
    let plain = session.open(&entry)?;

    output::print_entry(&plain, reveal);
    Ok(())
}
