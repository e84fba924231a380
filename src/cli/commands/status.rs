//! `squirrel status`: entry count and last ID.
//!
//! Reads the cached snapshot when present.  It may be stale if another
//! tool touched the data file; `--refresh` rescans.

use std::io;

use crate::cli::commands::refresh_snapshot;
use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{Result, SquirrelError};
use crate::vault::{has_verification, Snapshot};

/// Execute the `status` command.
pub fn execute(cli: &Cli, refresh: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let store = ctx.store();

    if !has_verification(&ctx.paths.verification) {
        output::info("No store initialized here.");
        output::tip("Run `squirrel init` to create one.");
        return Ok(());
    }

    let (snapshot, source) = if refresh {
        (refresh_snapshot(&ctx, &store)?, "rescanned")
    } else {
        match Snapshot::load(&ctx.paths.state) {
            Ok(s) => (s, "cached"),
            // No snapshot yet: fall back to a scan, without saving it.
            Err(SquirrelError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                (Snapshot::recompute(&store)?, "scanned")
            }
            Err(e) => return Err(e),
        }
    };

    output::info(&format!(
        "There are {} entries, last ID {} ({source}).",
        snapshot.count, snapshot.last_id
    ));
    Ok(())
}
