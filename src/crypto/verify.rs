//! Password verification without storing the password.
//!
//! A fixed known plaintext is encrypted under the session key when the
//! store is first created.  On later runs the candidate key decrypts
//! that artifact; recovering the known plaintext means the password was
//! right.

use subtle::ConstantTimeEq;

use super::encryption::{decrypt_bytes, encrypt};
use super::keys::SessionKey;
use crate::errors::Result;

/// The known plaintext sealed in the verification artifact.
pub const VERIFICATION_PLAINTEXT: &str = "squirrel";

/// Outcome of checking a candidate key against the stored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
}

impl Verification {
    pub fn is_match(self) -> bool {
        self == Verification::Match
    }
}

/// Encrypt the known plaintext under `key`, producing a new artifact.
pub fn create_verification(key: &SessionKey) -> Result<String> {
    encrypt(VERIFICATION_PLAINTEXT, key.as_bytes())
}

/// Check `candidate` against a stored verification ciphertext.
///
/// A structurally valid artifact that decrypts to the wrong plaintext is
/// `Mismatch`.  Malformed hex or a too-short artifact is an error.
pub fn verify_password(candidate: &SessionKey, stored: &str) -> Result<Verification> {
    let plain = decrypt_bytes(stored, candidate.as_bytes())?;

    let matches: bool = plain
        .as_slice()
        .ct_eq(VERIFICATION_PLAINTEXT.as_bytes())
        .into();

    Ok(if matches {
        Verification::Match
    } else {
        Verification::Mismatch
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SquirrelError;

    #[test]
    fn fresh_artifact_matches_its_key() {
        let key = SessionKey::new([3u8; 32]);
        let artifact = create_verification(&key).unwrap();
        assert_eq!(verify_password(&key, &artifact).unwrap(), Verification::Match);
    }

    #[test]
    fn other_key_is_mismatch_not_error() {
        let key = SessionKey::new([3u8; 32]);
        let other = SessionKey::new([4u8; 32]);
        let artifact = create_verification(&key).unwrap();
        assert_eq!(
            verify_password(&other, &artifact).unwrap(),
            Verification::Mismatch
        );
    }

    #[test]
    fn truncated_artifact_is_error() {
        let key = SessionKey::new([3u8; 32]);
        let err = verify_password(&key, "abcd").unwrap_err();
        assert!(matches!(err, SquirrelError::CiphertextTooShort));
    }
}
