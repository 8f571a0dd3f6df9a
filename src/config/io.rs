//! Decoding and encoding a configuration as TOML text.
//!
//! The TOML grammar itself belongs to the `toml` crate; this module only
//! moves the tree across that boundary. A decode failure yields an error
//! and no partial configuration.

use std::fmt;
use std::io::{Cursor, Read, Write};
use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::{Config, ConfigError};
use crate::value::table_from_toml;

impl Config {
    /// Decodes a TOML document from `reader` into a fresh configuration.
    pub fn read_from(mut reader: impl Read) -> Result<Self, ConfigError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        contents.parse()
    }

    /// Encodes the tree as TOML text and writes it to `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), ConfigError> {
        writer.write_all(self.to_toml_string()?.as_bytes())?;
        Ok(())
    }

    /// Renders the tree as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let value = toml::Value::from(self.root().clone());
        Ok(toml::to_string_pretty(&value)?)
    }

    /// Returns the TOML rendering as a read-backed byte stream, for
    /// consumers that want an `io::Read` rather than a string.
    pub fn reader(&self) -> Result<Cursor<Vec<u8>>, ConfigError> {
        Ok(Cursor::new(self.to_toml_string()?.into_bytes()))
    }

    /// Deserializes the tree into a statically-typed value.
    ///
    /// This is the bridge from string-driven access to compile-time-known
    /// structs once loading and overrides are done.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let value = toml::Value::from(self.root().clone());
        value.try_into().map_err(ConfigError::from)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let table: toml::Table = toml::from_str(s)?;
        Ok(Self::from_table(table_from_toml(table)))
    }
}

/// Renders the TOML text; an encoding failure renders as a placeholder
/// instead of aborting the surrounding format operation.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_toml_string() {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "<unencodable config: {e}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const DOCUMENT: &str = r#"
        domain = "staging"

        [meta]
        owner = "ops"
        created = 2014-05-09T12:01:05Z

        [limits]
        workers = 10
        ratio = 10.1
        ports = [8080, 8081]
        "#;

    #[test]
    fn test_decode_encode_round_trip() {
        let first: Config = DOCUMENT.parse().unwrap();
        let encoded = first.to_toml_string().unwrap();
        let second: Config = encoded.parse().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_read_from_and_write_to() {
        let config = Config::read_from(DOCUMENT.as_bytes()).unwrap();

        let mut buffer = Vec::new();
        config.write_to(&mut buffer).unwrap();
        let reparsed = Config::read_from(buffer.as_slice()).unwrap();

        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_decode_failure_yields_no_config() {
        let result: Result<Config, _> = "domain = ".parse();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_reader_streams_toml_text() {
        let config: Config = DOCUMENT.parse().unwrap();

        let mut text = String::new();
        config.reader().unwrap().read_to_string(&mut text).unwrap();

        assert_eq!(text, config.to_toml_string().unwrap());
        assert!(text.contains("domain"));
    }

    #[test]
    fn test_display_renders_toml() {
        let config: Config = DOCUMENT.parse().unwrap();
        let text = format!("{config}");

        assert!(text.contains("domain"));
        assert!(text.contains("staging"));
    }

    #[test]
    fn test_deserialize_into_typed_struct() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Limits {
            workers: u32,
            ratio: f64,
            ports: Vec<u16>,
        }

        #[derive(Debug, Deserialize)]
        struct Deploy {
            domain: String,
            limits: Limits,
        }

        let config: Config = DOCUMENT.parse().unwrap();
        let deploy: Deploy = config.deserialize().unwrap();

        assert_eq!(deploy.domain, "staging");
        assert_eq!(
            deploy.limits,
            Limits {
                workers: 10,
                ratio: 10.1,
                ports: vec![8080, 8081],
            }
        );
    }

    #[test]
    fn test_deserialize_mismatch_fails() {
        #[derive(Debug, Deserialize)]
        struct Wrong {
            #[allow(dead_code)]
            domain: i64,
        }

        let config: Config = DOCUMENT.parse().unwrap();
        assert!(config.deserialize::<Wrong>().is_err());
    }
}
