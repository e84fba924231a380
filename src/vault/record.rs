//! Binary record format.
//!
//! The data file is a plain concatenation of records with no header,
//! version tag, or footer.  Each record has this layout (all integers
//! little-endian, no padding):
//!
//! ```text
//! [id: i64][len: u64][title][len: u64][username][len: u64][password][len: u64][address][len: u64][notes]
//! ```
//!
//! Strings are length-prefixed, never null-terminated, so empty strings
//! and arbitrary content round-trip.  The same string encoding is reused
//! on its own for the verification file.

use std::io::{self, Read, Write};

use super::entry::Entry;
use crate::errors::{Result, SquirrelError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of the record ID prefix.
const ID_LEN: usize = 8;

/// Size of each string length prefix.
const LEN_PREFIX: usize = 8;

/// Number of string fields following the ID.
const FIELD_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialize a record into its on-disk bytes.
pub fn encode(entry: &Entry) -> Vec<u8> {
    let fields = entry.fields();
    let body: usize = fields.iter().map(|f| f.len()).sum();
    let mut buf = Vec::with_capacity(ID_LEN + FIELD_COUNT * LEN_PREFIX + body);

    buf.extend_from_slice(&entry.id.to_le_bytes());
    for field in fields {
        put_string(&mut buf, field);
    }
    buf
}

/// Append one length-prefixed string to `buf`.
pub fn put_string(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

/// Write one length-prefixed string to `writer`.
pub fn write_string<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_all(&(value.len() as u64).to_le_bytes())?;
    writer.write_all(value.as_bytes())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Read the next record from `reader`.
///
/// Returns `Ok(None)` when the stream ends exactly on a record boundary.
/// Any other short read is `Corrupt`.
pub fn decode<R: Read>(reader: &mut R) -> Result<Option<Entry>> {
    let mut id_buf = [0u8; ID_LEN];
    match fill(reader, &mut id_buf)? {
        0 => return Ok(None),
        ID_LEN => {}
        n => {
            return Err(SquirrelError::Corrupt(format!(
                "truncated record id ({n} of {ID_LEN} bytes)"
            )))
        }
    }
    let id = i64::from_le_bytes(id_buf);

    let title = read_field(reader, id, "title")?;
    let username = read_field(reader, id, "username")?;
    let password = read_field(reader, id, "password")?;
    let address = read_field(reader, id, "address")?;
    let notes = read_field(reader, id, "notes")?;

    Ok(Some(Entry {
        id,
        title,
        username,
        password,
        address,
        notes,
    }))
}

/// Read one length-prefixed string.  Any truncation is `Corrupt`.
pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let mut len_buf = [0u8; LEN_PREFIX];
    let n = fill(reader, &mut len_buf)?;
    if n != LEN_PREFIX {
        return Err(SquirrelError::Corrupt(format!(
            "truncated length prefix ({n} of {LEN_PREFIX} bytes)"
        )));
    }
    let len = u64::from_le_bytes(len_buf);

    // `take` keeps a garbage length from allocating the whole prefix up front.
    let mut bytes = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != len {
        return Err(SquirrelError::Corrupt(format!(
            "truncated string ({} of {len} bytes)",
            bytes.len()
        )));
    }

    String::from_utf8(bytes)
        .map_err(|_| SquirrelError::Corrupt("string field is not valid UTF-8".into()))
}

fn read_field<R: Read>(reader: &mut R, id: i64, name: &str) -> Result<String> {
    read_string(reader).map_err(|e| match e {
        SquirrelError::Corrupt(msg) => {
            SquirrelError::Corrupt(format!("record {id}, field {name}: {msg}"))
        }
        other => other,
    })
}

/// Read until `buf` is full or the stream ends.  Returns the byte count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ---------------------------------------------------------------------------
// Streaming reader
// ---------------------------------------------------------------------------

/// Iterator over the records in a byte stream.
///
/// Yields `Err` once on the first corrupt record and then stops.
pub struct EntryReader<R> {
    reader: R,
    done: bool,
}

impl<R: Read> EntryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: Read> Iterator for EntryReader<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode(&mut self.reader) {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
