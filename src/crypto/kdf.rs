//! Password-based key derivation.
//!
//! The session key is produced in two chained stages:
//!
//! 1. scrypt (N = 16384, r = 8, p = 1) over the password with an empty
//!    salt yields a 32-byte intermediate value.
//! 2. PBKDF2-HMAC-SHA256 (4096 rounds) over the password, salted with
//!    that intermediate value, yields the 32-byte session key.
//!
//! Both stages and their parameters are part of the on-disk
//! compatibility contract: the verification artifact only matches if
//! the exact same bytes are reproduced on every run.

use pbkdf2::pbkdf2_hmac;
use scrypt::Params;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::SessionKey;
use crate::errors::{Result, SquirrelError};

/// Length of every derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// log2(N) for scrypt, N = 16384.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

const PBKDF2_ROUNDS: u32 = 4096;

/// Salt used for the scrypt stage.  Always empty, so the whole chain
/// depends on the password alone.
pub const INTERMEDIATE_SALT: &[u8] = b"";

/// Run the memory-hard scrypt stage.
///
/// The output is only used as the salt of `derive_session_key`.
pub fn derive_intermediate(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| SquirrelError::KeyDerivationFailed(format!("invalid scrypt params: {e}")))?;

    let mut out = [0u8; KEY_LEN];
    scrypt::scrypt(password, salt, &params, &mut out)
        .map_err(|e| SquirrelError::KeyDerivationFailed(format!("scrypt failed: {e}")))?;

    Ok(out)
}

/// Run the PBKDF2-HMAC-SHA256 stage that produces the working key.
pub fn derive_session_key(password: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ROUNDS, &mut out);
    out
}

/// Derive the session key for `password` by chaining both stages.
pub fn derive_key(password: &[u8]) -> Result<SessionKey> {
    let mut salt = derive_intermediate(password, INTERMEDIATE_SALT)?;
    let mut key_bytes = derive_session_key(password, &salt);
    salt.zeroize();

    let key = SessionKey::new(key_bytes);
    key_bytes.zeroize();

    Ok(key)
}
