//! AES-256 in CFB mode, hex-encoded.
//!
//! Each call to `encrypt` generates a fresh random 16-byte IV and
//! prepends it to the ciphertext before hex-encoding.  `decrypt` splits
//! the IV back out before decrypting.
//!
//! Layout of the decoded byte buffer:
//!   [ 16-byte IV | ciphertext (same length as plaintext) ]
//!
//! There is no authentication tag.  Decrypting with the wrong key does
//! not fail, it yields garbage plaintext.

use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use aes::Aes256;
use rand::RngCore;

use crate::errors::{Result, SquirrelError};

type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// AES block size, which is also the IV length.
pub const BLOCK_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `hex(iv || ciphertext)`.
pub fn encrypt(plaintext: &str, key: &[u8]) -> Result<String> {
    let mut output = vec![0u8; BLOCK_LEN + plaintext.len()];
    let (iv, body) = output.split_at_mut(BLOCK_LEN);

    rand::rng().fill_bytes(iv);
    body.copy_from_slice(plaintext.as_bytes());

    let cipher = Aes256CfbEnc::new_from_slices(key, iv)
        .map_err(|e| SquirrelError::EncryptionFailed(format!("invalid key length: {e}")))?;
    cipher.encrypt(body);

    Ok(hex::encode(output))
}

/// Decrypt a hex string produced by `encrypt`.
///
/// Invalid UTF-8 in the recovered bytes (the usual result of a wrong
/// key) is replaced rather than reported.
pub fn decrypt(ciphertext_hex: &str, key: &[u8]) -> Result<String> {
    let bytes = decrypt_bytes(ciphertext_hex, key)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decrypt to raw bytes without any UTF-8 interpretation.
pub fn decrypt_bytes(ciphertext_hex: &str, key: &[u8]) -> Result<Vec<u8>> {
    let mut data = hex::decode(ciphertext_hex)
        .map_err(|e| SquirrelError::InvalidCiphertext(format!("hex: {e}")))?;

    if data.len() < BLOCK_LEN {
        return Err(SquirrelError::CiphertextTooShort);
    }

    let (iv, body) = data.split_at_mut(BLOCK_LEN);
    let cipher = Aes256CfbDec::new_from_slices(key, iv)
        .map_err(|e| SquirrelError::InvalidCiphertext(format!("invalid key length: {e}")))?;
    cipher.decrypt(body);

    Ok(data.split_off(BLOCK_LEN))
}
