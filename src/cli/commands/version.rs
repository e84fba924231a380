//! `squirrel version`: display version.

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("squirrel {current}");
    Ok(())
}
