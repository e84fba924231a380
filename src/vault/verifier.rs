//! The verification file.
//!
//! Holds a single length-prefixed string (the record string encoding
//! used on its own): the hex ciphertext of the known plaintext under the
//! session key.  It is written once when the store is initialized.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use super::record::{put_string, read_string};
use crate::errors::Result;

/// Write the verification artifact to `path` via temp file + rename.
pub fn write_verification(path: &Path, ciphertext: &str) -> Result<()> {
    let mut buf = Vec::with_capacity(8 + ciphertext.len());
    put_string(&mut buf, ciphertext);

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&buf)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read the verification artifact from `path`.
pub fn read_verification(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    read_string(&mut reader)
}

/// Returns `true` if a verification file exists at `path`.
pub fn has_verification(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}
