//! Cryptographic primitives for Squirrel.
//!
//! This module provides:
//! - AES-256-CFB field encryption with hex encoding (`encryption`)
//! - The scrypt -> PBKDF2 session key derivation chain (`kdf`)
//! - The zeroizing `SessionKey` wrapper (`keys`)
//! - Password verification against a stored artifact (`verify`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod verify;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_intermediate, derive_key, derive_session_key};
pub use keys::SessionKey;
pub use verify::{create_verification, verify_password, Verification};
