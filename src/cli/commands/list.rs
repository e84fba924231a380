//! `squirrel list`: display entries in a table.

use crate::cli::output;
use crate::cli::{parse_list_args, Cli, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, order: Option<&str>, limit: Option<usize>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (order, limit) = parse_list_args(order, limit, &ctx.settings)?;
    let session = ctx.unlock()?;

    let store = ctx.store();
    let count = store.count_entries()?;
    output::info(&format!("There are {count} entries."));

    let entries = store
        .list_entries(order, limit)?
        .iter()
        .map(|e| session.open(e))
        .collect::<Result<Vec<_>>>()?;

    output::print_entries_table(&entries);
    Ok(())
}
