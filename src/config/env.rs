//! Environment-variable configuration source.

use super::overrides::infer_value;
use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// A configuration source that reads prefixed environment variables.
///
/// `PREFIX<sep>SECTION<sep>FIELD=value` maps to the path `section.field`;
/// segments are lowercased and values go through the same type inference as
/// command-line overrides.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in std::env::vars() {
            if let Some(path_str) = key.strip_prefix(&prefix_with_sep) {
                if path_str.is_empty() {
                    continue;
                }

                let path: Vec<String> = path_str
                    .split(&self.separator)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_lowercase())
                    .collect();
                if path.is_empty() {
                    continue;
                }

                tracing::trace!(%key, "picked up environment override");
                entries.push(ConfigEntry::at_path(path, infer_value(&value)));
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_env_source_maps_and_coerces() {
        // Unique names keep this independent of other tests' environments.
        std::env::set_var("DRAGON_CONF_ENVTEST__LIMITS__WORKERS", "4");
        std::env::set_var("DRAGON_CONF_ENVTEST__META__OWNER", "ops");

        let source = EnvSource::new("DRAGON_CONF_ENVTEST", "__");
        let mut entries = source.entries().unwrap();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, vec!["limits", "workers"]);
        assert_eq!(entries[0].value, Value::Integer(4));
        assert_eq!(entries[1].path, vec!["meta", "owner"]);
        assert_eq!(entries[1].value, Value::String("ops".to_string()));

        std::env::remove_var("DRAGON_CONF_ENVTEST__LIMITS__WORKERS");
        std::env::remove_var("DRAGON_CONF_ENVTEST__META__OWNER");
    }

    #[test]
    fn test_env_source_ignores_bare_prefix() {
        std::env::set_var("DRAGON_CONF_BARE__", "x");

        let source = EnvSource::new("DRAGON_CONF_BARE", "__");
        assert!(source.entries().unwrap().is_empty());

        std::env::remove_var("DRAGON_CONF_BARE__");
    }
}
