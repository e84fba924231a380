//! Unlocked access to a store.
//!
//! A `Session` is created either by initializing a new store (first run)
//! or by unlocking an existing one with the master password.  It holds
//! the session key for the life of the process and uses it to seal
//! plaintext entries before they reach `EntryStore` and to open them
//! after they come back.

use std::fs;

use tracing::{debug, info};

use crate::config::StorePaths;
use crate::crypto::{self, create_verification, derive_key, verify_password, SessionKey};
use crate::errors::{Result, SquirrelError};
use crate::vault::{self, Entry, NewEntry, PlainEntry};

/// An unlocked store: holds the session key.
pub struct Session {
    key: SessionKey,
}

impl Session {
    /// First run: derive the key and write the verification artifact.
    ///
    /// Fails if a verification file already exists; the artifact is
    /// never replaced.
    pub fn initialize(paths: &StorePaths, password: &[u8]) -> Result<Self> {
        if vault::has_verification(&paths.verification) {
            return Err(SquirrelError::StoreAlreadyInitialized(paths.dir.clone()));
        }

        fs::create_dir_all(&paths.dir)?;

        let key = derive_key(password)?;
        let artifact = create_verification(&key)?;
        vault::write_verification(&paths.verification, &artifact)?;

        info!(dir = %paths.dir.display(), "store initialized");
        Ok(Self { key })
    }

    /// Returning user: derive the key and check it against the stored
    /// artifact.  A wrong password is `WrongPassword`.
    pub fn unlock(paths: &StorePaths, password: &[u8]) -> Result<Self> {
        if !vault::has_verification(&paths.verification) {
            return Err(SquirrelError::StoreNotInitialized(paths.dir.clone()));
        }

        let artifact = vault::read_verification(&paths.verification)?;
        let key = derive_key(password)?;

        if !verify_password(&key, &artifact)?.is_match() {
            debug!("verification artifact did not match");
            return Err(SquirrelError::WrongPassword);
        }

        Ok(Self { key })
    }

    /// Encrypt every field except the title.
    pub fn seal(&self, id: i64, entry: &NewEntry) -> Result<Entry> {
        let key = self.key.as_bytes();
        Ok(Entry {
            id,
            title: entry.title.clone(),
            username: crypto::encrypt(&entry.username, key)?,
            password: crypto::encrypt(&entry.password, key)?,
            address: crypto::encrypt(&entry.address, key)?,
            notes: crypto::encrypt(&entry.notes, key)?,
        })
    }

    /// Decrypt every field except the title.
    pub fn open(&self, entry: &Entry) -> Result<PlainEntry> {
        let key = self.key.as_bytes();
        Ok(PlainEntry {
            id: entry.id,
            title: entry.title.clone(),
            username: crypto::decrypt(&entry.username, key)?,
            password: crypto::decrypt(&entry.password, key)?,
            address: crypto::decrypt(&entry.address, key)?,
            notes: crypto::decrypt(&entry.notes, key)?,
        })
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }
}
