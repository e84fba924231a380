//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod show;
pub mod status;
pub mod version;

use crate::cli::Context;
use crate::errors::Result;
use crate::vault::{EntryStore, Snapshot};

/// Rescan the data file and rewrite the cached snapshot.
///
/// Called explicitly after every mutation; the store never does this on
/// its own.
pub(crate) fn refresh_snapshot(ctx: &Context, store: &EntryStore) -> Result<Snapshot> {
    let snapshot = Snapshot::recompute(store)?;
    snapshot.save(&ctx.paths.state)?;
    Ok(snapshot)
}
