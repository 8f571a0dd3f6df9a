//! Typed coercion accessors over the path engine.
//!
//! Every accessor is read-only: it resolves the path with
//! [`Config::get_path`] and then pattern-matches the value's kind. Absence
//! becomes [`ConfigError::NotFound`], a present value of the wrong kind
//! becomes [`ConfigError::TypeMismatch`]. Both are recoverable; combined
//! with `unwrap_or_default()` a caller gets the documented fallback (zero
//! for scalars, an empty container for tables and arrays) in one step:
//!
//! ```
//! use dragon_conf::Config;
//!
//! let config = Config::new();
//! let size = config.get_int(&["resources", "pool", "size"]).unwrap_or_default();
//! assert_eq!(size, 0);
//! ```

use crate::value::{Kind, Table, Value};

use super::{Config, ConfigError};

impl Config {
    fn lookup(&self, path: &[&str]) -> Result<&Value, ConfigError> {
        self.get_path(path)
            .ok_or_else(|| ConfigError::NotFound(path.join(".")))
    }

    /// Returns the integer at `path`. No widening or narrowing is applied.
    pub fn get_int(&self, path: &[&str]) -> Result<i64, ConfigError> {
        match self.lookup(path)? {
            Value::Integer(i) => Ok(*i),
            other => Err(mismatch(path, Kind::Integer, other)),
        }
    }

    /// Returns the float at `path`. An integer widens to `f64`; any other
    /// kind is a mismatch.
    pub fn get_float(&self, path: &[&str]) -> Result<f64, ConfigError> {
        match self.lookup(path)? {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(mismatch(path, Kind::Float, other)),
        }
    }

    /// Returns the string at `path`.
    pub fn get_string(&self, path: &[&str]) -> Result<String, ConfigError> {
        match self.lookup(path)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(path, Kind::String, other)),
        }
    }

    /// Returns the boolean at `path`.
    pub fn get_bool(&self, path: &[&str]) -> Result<bool, ConfigError> {
        match self.lookup(path)? {
            Value::Boolean(b) => Ok(*b),
            other => Err(mismatch(path, Kind::Boolean, other)),
        }
    }

    /// Returns a defensive copy of the table at `path`. Mutating the copy
    /// never touches the tree.
    pub fn get_map(&self, path: &[&str]) -> Result<Table, ConfigError> {
        match self.lookup(path)? {
            Value::Table(table) => Ok(table.clone()),
            other => Err(mismatch(path, Kind::Table, other)),
        }
    }

    /// Returns a copy of the array at `path` as generic values.
    pub fn get_slice(&self, path: &[&str]) -> Result<Vec<Value>, ConfigError> {
        match self.lookup(path)? {
            Value::Array(values) => Ok(values.clone()),
            other => Err(mismatch(path, Kind::Array, other)),
        }
    }

    /// Returns the array at `path` as strings. Every element must be a
    /// string; a single element of another kind fails the whole call.
    pub fn get_string_slice(&self, path: &[&str]) -> Result<Vec<String>, ConfigError> {
        let values = match self.lookup(path)? {
            Value::Array(values) => values,
            other => return Err(mismatch(path, Kind::Array, other)),
        };

        let mut strings = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match value {
                Value::String(s) => strings.push(s.clone()),
                other => {
                    return Err(ConfigError::TypeMismatch {
                        path: format!("{}[{index}]", path.join(".")),
                        expected: Kind::String,
                        actual: other.kind(),
                    })
                }
            }
        }
        Ok(strings)
    }
}

fn mismatch(path: &[&str], expected: Kind, actual: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.join("."),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Config {
        r#"
        domain = "staging"

        [meta]
        owner = "ops"
        email = "ops@example.net"
        description = "Staging deploy"
        active = true
        archived = false

        [limits]
        workers = 10
        ratio = 10.1
        ports = [8080, 8081, 8082]

        [resources.mongo]
        provider = "dbcluster"

        [resources.frontend]
        provider = "nodepool"
        depends = ["mongo", "cache"]

        [resources.cache]
        provider = "memcache"
        "#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_get_int() {
        let config = fixture();
        assert_eq!(config.get_int(&["limits", "workers"]).unwrap(), 10);
    }

    #[test]
    fn test_get_int_fail() {
        let config = fixture();
        for path in [&["meta", "foo", "bar"][..], &["domain"][..]] {
            let err = config.get_int(path).unwrap_err();
            assert_eq!(config.get_int(path).unwrap_or_default(), 0);
            match (path.len(), err) {
                (3, ConfigError::NotFound(p)) => assert_eq!(p, "meta.foo.bar"),
                (1, ConfigError::TypeMismatch { actual, .. }) => {
                    assert_eq!(actual, Kind::String);
                }
                (_, other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_get_float_widens_integer() {
        let config = fixture();
        assert_eq!(config.get_float(&["limits", "ratio"]).unwrap(), 10.1);
        assert_eq!(config.get_float(&["limits", "workers"]).unwrap(), 10.0);
    }

    #[test]
    fn test_get_float_fail() {
        let config = fixture();
        assert!(matches!(
            config.get_float(&["meta", "active"]).unwrap_err(),
            ConfigError::TypeMismatch {
                expected: Kind::Float,
                actual: Kind::Boolean,
                ..
            }
        ));
        assert!(matches!(
            config.get_float(&["meta", "foo", "bar"]).unwrap_err(),
            ConfigError::NotFound(_)
        ));
    }

    #[test]
    fn test_get_string() {
        let config = fixture();
        assert_eq!(config.get_string(&["domain"]).unwrap(), "staging");

        assert!(config.get_string(&["meta"]).is_err());
        assert!(config.get_string(&["meta", "bar", "bazzar"]).is_err());
        assert_eq!(config.get_string(&["meta"]).unwrap_or_default(), "");
    }

    #[test]
    fn test_get_bool() {
        let config = fixture();
        assert!(config.get_bool(&["meta", "active"]).unwrap());
        assert!(!config.get_bool(&["meta", "archived"]).unwrap());

        assert!(config.get_bool(&["meta"]).is_err());
        assert!(!config.get_bool(&["meta"]).unwrap_or_default());
    }

    #[test]
    fn test_get_map() {
        let config = fixture();
        let meta = config.get_map(&["meta"]).unwrap();
        assert_eq!(meta["owner"], Value::from("ops"));
        assert_eq!(meta["active"], Value::from(true));
        assert_eq!(meta.len(), 5);
    }

    #[test]
    fn test_get_map_is_defensive_copy() {
        let config = fixture();
        let mut meta = config.get_map(&["meta"]).unwrap();
        meta.insert("injected".to_string(), Value::from(true));

        assert_eq!(config.get_path(&["meta", "injected"]), None);
    }

    #[test]
    fn test_get_map_fail() {
        let config = fixture();
        for path in [&["meta", "foo", "bar"][..], &["domain"][..]] {
            assert!(config.get_map(path).is_err());
            assert!(config.get_map(path).unwrap_or_default().is_empty());
        }
    }

    #[test]
    fn test_get_slice() {
        let config = fixture();
        let ports = config.get_slice(&["limits", "ports"]).unwrap();
        assert_eq!(
            ports,
            vec![Value::from(8080i64), Value::from(8081i64), Value::from(8082i64)]
        );

        assert!(config.get_slice(&["domain"]).is_err());
        assert!(config.get_slice(&["domain"]).unwrap_or_default().is_empty());
    }

    #[test]
    fn test_get_string_slice() {
        let config = fixture();
        assert_eq!(
            config
                .get_string_slice(&["resources", "frontend", "depends"])
                .unwrap(),
            vec!["mongo".to_string(), "cache".to_string()]
        );
    }

    #[test]
    fn test_get_string_slice_rejects_mixed_elements() {
        let config = fixture();
        let err = config.get_string_slice(&["limits", "ports"]).unwrap_err();
        match err {
            ConfigError::TypeMismatch {
                path,
                expected,
                actual,
            } => {
                assert_eq!(path, "limits.ports[0]");
                assert_eq!(expected, Kind::String);
                assert_eq!(actual, Kind::Integer);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(config
            .get_string_slice(&["limits", "ports"])
            .unwrap_or_default()
            .is_empty());
    }
}
