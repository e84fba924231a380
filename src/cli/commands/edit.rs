//! `squirrel edit`: replace fields of an existing entry.

use crate::cli::commands::refresh_snapshot;
use crate::cli::output;
use crate::cli::{Cli, Context, EntryFields};
use crate::errors::{Result, SquirrelError};

/// Execute the `edit` command.
///
/// Only the fields passed on the command line change; the rest are
/// decrypted from the stored entry and written back re-encrypted.
pub fn execute(cli: &Cli, id: i64, title: Option<&str>, fields: &EntryFields) -> Result<()> {
    if title.is_none()
        && fields.username.is_none()
        && fields.password.is_none()
        && fields.address.is_none()
        && fields.notes.is_none()
    {
        return Err(SquirrelError::CommandFailed(
            "nothing to change — pass at least one of --title, --username, --password, --address, --notes".into(),
        ));
    }

    let ctx = Context::load(cli)?;
    let session = ctx.unlock()?;
    let mut store = ctx.store();

    let mut edited = session.open(&store.load(id)?)?.into_new();
    if let Some(v) = title {
        edited.title = v.to_string();
    }
    if let Some(v) = &fields.username {
        edited.username = v.clone();
    }
    if let Some(v) = &fields.password {
        output::warning("Password provided on command line — it may appear in shell history.");
        edited.password = v.clone();
    }
    if let Some(v) = &fields.address {
        edited.address = v.clone();
    }
    if let Some(v) = &fields.notes {
        edited.notes = v.clone();
    }

    let sealed = session.seal(id, &edited)?;
    store.update(id, &sealed)?;
    refresh_snapshot(&ctx, &store)?;

    output::success(&format!("Entry {id} updated"));
    Ok(())
}
