//! Cached `{last_id, count}` summary of the data file.
//!
//! The state file is exactly 16 bytes: two little-endian `i64` values.
//! It is advisory only.  `EntryStore` never reads or refreshes it, so it
//! goes stale after every mutation until a caller saves a new one.

use std::fs;
use std::path::Path;

use super::store::EntryStore;
use crate::errors::{Result, SquirrelError};

/// Size of the state file in bytes.
pub const SNAPSHOT_LEN: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub last_id: i64,
    pub count: i64,
}

impl Snapshot {
    /// Rebuild the snapshot with full scans of `store`.
    pub fn recompute(store: &EntryStore) -> Result<Self> {
        Ok(Self {
            last_id: store.largest_id()?,
            count: store.count_entries()?,
        })
    }

    pub fn to_bytes(&self) -> [u8; SNAPSHOT_LEN] {
        let mut buf = [0u8; SNAPSHOT_LEN];
        buf[..8].copy_from_slice(&self.last_id.to_le_bytes());
        buf[8..].copy_from_slice(&self.count.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SNAPSHOT_LEN {
            return Err(SquirrelError::Corrupt(format!(
                "state file is {} bytes, expected {SNAPSHOT_LEN}",
                bytes.len()
            )));
        }
        let mut last_id = [0u8; 8];
        let mut count = [0u8; 8];
        last_id.copy_from_slice(&bytes[..8]);
        count.copy_from_slice(&bytes[8..SNAPSHOT_LEN]);
        Ok(Self {
            last_id: i64::from_le_bytes(last_id),
            count: i64::from_le_bytes(count),
        })
    }

    /// Overwrite the state file at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Read the state file at `path`.
    ///
    /// A missing file surfaces as `Io(NotFound)`; deciding what an
    /// absent snapshot means is up to the caller.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.bin");
        let snapshot = Snapshot {
            last_id: 42,
            count: 7,
        };

        snapshot.save(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), SNAPSHOT_LEN);
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn layout_is_two_le_i64() {
        let bytes = Snapshot {
            last_id: 1,
            count: 2,
        }
        .to_bytes();
        assert_eq!(bytes, [1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn missing_file_is_io_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Snapshot::load(&dir.path().join("state.bin")).unwrap_err();
        assert!(matches!(err, SquirrelError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn short_file_is_corrupt() {
        assert!(matches!(
            Snapshot::from_bytes(&[0u8; 10]),
            Err(SquirrelError::Corrupt(_))
        ));
    }

    #[test]
    fn oversize_file_is_corrupt() {
        assert!(matches!(
            Snapshot::from_bytes(&[0u8; 24]),
            Err(SquirrelError::Corrupt(_))
        ));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.bin");
        fs::write(&path, [0u8; SNAPSHOT_LEN + 1]).unwrap();
        assert!(matches!(
            Snapshot::load(&path),
            Err(SquirrelError::Corrupt(_))
        ));
    }
}
