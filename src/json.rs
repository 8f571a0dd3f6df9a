//! JSON projection of value graphs.
//!
//! Projects a configuration tree (or any serializable value) to a stream
//! of canonical, minified JSON bytes. A value whose serialization fails
//! surfaces as a single error for the whole call; there is no partial
//! output.

use std::io::Cursor;

use serde::Serialize;

use crate::config::{Config, ConfigError};

/// Serializes `value` as minified JSON and returns the bytes behind an
/// `io::Read`.
///
/// ```
/// use std::io::Read;
///
/// let mut out = String::new();
/// dragon_conf::to_json_reader(&[1, 2, 3])
///     .unwrap()
///     .read_to_string(&mut out)
///     .unwrap();
/// assert_eq!(out, "[1,2,3]");
/// ```
pub fn to_json_reader<T: Serialize>(value: &T) -> Result<Cursor<Vec<u8>>, ConfigError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(Cursor::new(bytes))
}

impl Config {
    /// Projects the whole tree as minified JSON bytes.
    pub fn json_reader(&self) -> Result<Cursor<Vec<u8>>, ConfigError> {
        to_json_reader(self.root())
    }
}
