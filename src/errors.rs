use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Squirrel.
#[derive(Debug, Error)]
pub enum SquirrelError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Ciphertext too short")]
    CiphertextTooShort,

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Wrong password")]
    WrongPassword,

    // --- Store errors ---
    #[error("Entry {0} not found")]
    EntryNotFound(i64),

    #[error("Entry with ID {0} already exists")]
    EntryAlreadyExists(i64),

    #[error("Corrupt store: {0}")]
    Corrupt(String),

    #[error("Unknown order '{0}' — expected `title` or `username`")]
    UnknownOrder(String),

    #[error("Store not initialized at {0} — run `squirrel init` first")]
    StoreNotInitialized(PathBuf),

    #[error("Store already initialized at {0}")]
    StoreAlreadyInitialized(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Squirrel results.
pub type Result<T> = std::result::Result<T, SquirrelError>;
