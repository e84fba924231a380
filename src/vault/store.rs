//! File-backed entry store.
//!
//! `EntryStore` owns the data file.  Reads are sequential scans from the
//! start; inserts append; updates and deletes rebuild the whole file
//! with one of two `RewriteStrategy` variants that produce identical
//! bytes.
//!
//! Mutating operations take `&mut self`, which serializes callers of one
//! store value.  The handle is not `Clone`; share it across threads
//! behind a `Mutex`.  Nothing stops a second `EntryStore` built from the
//! same path, in this process or another, from racing the scan-then-append
//! of `insert`.  Keep one handle per data file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::entry::{Entry, Order};
use super::record::{self, EntryReader};
use crate::errors::{Result, SquirrelError};

/// How update and delete rebuild the data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteStrategy {
    /// Stream every record into a temp file in the same directory, then
    /// rename it over the original.  The original stays intact until the
    /// replacement is complete.
    #[default]
    #[serde(rename = "copy")]
    CopyRewrite,

    /// Decode the whole file into memory, then truncate and rewrite it in
    /// place.  A crash mid-write loses data.
    InMemory,
}

/// What happens to the matching record during a rewrite.
enum Rewrite<'a> {
    Drop,
    Replace(&'a Entry),
}

impl Rewrite<'_> {
    fn apply(&self, id: i64) -> Option<Entry> {
        match self {
            Rewrite::Drop => None,
            Rewrite::Replace(new) => Some(Entry {
                id,
                ..(*new).clone()
            }),
        }
    }
}

/// Handle on the data file.
#[derive(Debug)]
pub struct EntryStore {
    path: PathBuf,
    strategy: RewriteStrategy,
    entry_threshold: Option<i64>,
}

impl EntryStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a handle for the data file at `path`.  Nothing is touched
    /// on disk until the first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strategy: RewriteStrategy::default(),
            entry_threshold: None,
        }
    }

    pub fn with_strategy(mut self, strategy: RewriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Log a warning once an insert takes the store past `threshold`
    /// entries.  Every rewrite is O(n), so large stores get slow.
    pub fn with_entry_threshold(mut self, threshold: i64) -> Self {
        self.entry_threshold = Some(threshold);
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns `true` if the data file exists.
    pub fn has_store(&self) -> bool {
        self.path.exists()
    }

    /// Find the first record with `id`.
    pub fn load(&self, id: i64) -> Result<Entry> {
        let Some(reader) = self.open_reader()? else {
            return Err(SquirrelError::EntryNotFound(id));
        };

        for item in reader {
            let entry = item?;
            if entry.id == id {
                return Ok(entry);
            }
        }
        Err(SquirrelError::EntryNotFound(id))
    }

    /// Number of records.  A missing data file counts as zero.
    pub fn count_entries(&self) -> Result<i64> {
        let Some(reader) = self.open_reader()? else {
            return Ok(0);
        };

        let mut count = 0;
        for item in reader {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Largest ID in the store, or 0 if it is missing or empty.
    pub fn largest_id(&self) -> Result<i64> {
        let Some(reader) = self.open_reader()? else {
            return Ok(0);
        };

        let mut largest = 0;
        for item in reader {
            largest = largest.max(item?.id);
        }
        Ok(largest)
    }

    /// Every record in append order.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        match self.open_reader()? {
            Some(reader) => reader.collect(),
            None => Ok(Vec::new()),
        }
    }

    /// All records stably sorted by `order`, truncated to `limit`.
    ///
    /// Ties keep their append order.  Comparison is byte-wise on the
    /// stored value, so `ByUsername` orders by ciphertext.
    pub fn list_entries(&self, order: Order, limit: usize) -> Result<Vec<Entry>> {
        let mut all = self.entries()?;
        // `sort_by` is stable.
        all.sort_by(|a, b| order.key(a).cmp(order.key(b)));
        all.truncate(limit);
        Ok(all)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a record.  Fails with `EntryAlreadyExists` (and writes
    /// nothing) if the ID is taken.
    ///
    /// A failed append is truncated away so the file stays a sequence of
    /// complete records.
    pub fn insert(&mut self, entry: &Entry) -> Result<()> {
        let mut count = 0;
        if let Some(reader) = self.open_reader()? {
            for item in reader {
                if item?.id == entry.id {
                    return Err(SquirrelError::EntryAlreadyExists(entry.id));
                }
                count += 1;
            }
        }

        let bytes = record::encode(entry);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let before = file.metadata()?.len();
        append_with_rollback(&mut file, before, &bytes, entry.id)?;

        info!(id = entry.id, "entry inserted");
        if let Some(threshold) = self.entry_threshold {
            if count + 1 > threshold {
                warn!(
                    count = count + 1,
                    threshold, "store is past its entry threshold; rewrites will be slow"
                );
            }
        }
        Ok(())
    }

    /// Remove the record with `id`.  The file is left untouched when no
    /// record matches.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.rewrite(id, Rewrite::Drop)?;
        info!(id, "entry deleted");
        Ok(())
    }

    /// Replace the record with `id` by `entry`.  The stored ID stays `id`
    /// whatever `entry.id` says.
    pub fn update(&mut self, id: i64, entry: &Entry) -> Result<()> {
        self.rewrite(id, Rewrite::Replace(entry))?;
        info!(id, "entry updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn strategy(&self) -> RewriteStrategy {
        self.strategy
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Open a buffered record reader, or `None` if the file is missing.
    fn open_reader(&self) -> Result<Option<EntryReader<BufReader<File>>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(EntryReader::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn rewrite(&mut self, id: i64, action: Rewrite<'_>) -> Result<()> {
        debug!(id, strategy = ?self.strategy, path = %self.path.display(), "rewriting data file");
        match self.strategy {
            RewriteStrategy::CopyRewrite => self.copy_rewrite(id, &action),
            RewriteStrategy::InMemory => self.in_memory_rewrite(id, &action),
        }
    }

    fn copy_rewrite(&self, id: i64, action: &Rewrite<'_>) -> Result<()> {
        let Some(reader) = self.open_reader()? else {
            return Err(SquirrelError::EntryNotFound(id));
        };

        // Same directory so the final rename stays on one filesystem.
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = tempfile::Builder::new()
            .prefix(".squirrel-")
            .suffix(".tmp")
            .tempfile_in(dir)?;

        let mut found = false;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for item in reader {
                let entry = item?;
                let out = if entry.id == id {
                    found = true;
                    action.apply(id)
                } else {
                    Some(entry)
                };
                if let Some(out) = out {
                    writer.write_all(&record::encode(&out))?;
                }
            }
            writer.flush()?;
        }

        // Dropping `tmp` here removes it; the original is untouched.
        if !found {
            return Err(SquirrelError::EntryNotFound(id));
        }

        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn in_memory_rewrite(&self, id: i64, action: &Rewrite<'_>) -> Result<()> {
        let Some(reader) = self.open_reader()? else {
            return Err(SquirrelError::EntryNotFound(id));
        };
        let entries = reader.collect::<Result<Vec<_>>>()?;

        let mut found = false;
        let mut buf = Vec::new();
        for entry in entries {
            let out = if entry.id == id {
                found = true;
                action.apply(id)
            } else {
                Some(entry)
            };
            if let Some(out) = out {
                buf.extend_from_slice(&record::encode(&out));
            }
        }

        if !found {
            return Err(SquirrelError::EntryNotFound(id));
        }

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(&buf)?;
        file.sync_all()?;
        Ok(())
    }
}

/// Sink for appends to the data file: it can be synced and cut back to
/// an earlier length.
trait AppendTarget: Write {
    fn sync(&mut self) -> io::Result<()>;
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl AppendTarget for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Write `bytes` and sync.  On failure the target is truncated back to
/// `before`, so a partial record never stays on disk.
fn append_with_rollback<T: AppendTarget>(
    target: &mut T,
    before: u64,
    bytes: &[u8],
    id: i64,
) -> io::Result<()> {
    if let Err(e) = target.write_all(bytes).and_then(|()| target.sync()) {
        warn!(id, error = %e, "append failed, rolling back");
        if let Err(rollback) = target.truncate_to(before) {
            warn!(error = %rollback, "rollback of partial append failed");
        }
        return Err(e);
    }
    Ok(())
}
