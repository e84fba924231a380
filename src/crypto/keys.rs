//! The in-memory session key.

use std::fmt;

use zeroize::Zeroize;

use super::kdf::KEY_LEN;

/// A wrapper around the 32-byte session key that automatically zeroes
/// its memory when dropped.
///
/// The key is derived once per run and never written to disk.  It is
/// passed explicitly to every encrypt/decrypt call.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SessionKey {
    bytes: [u8; KEY_LEN],
}

impl SessionKey {
    /// Create a new `SessionKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SessionKey {}
