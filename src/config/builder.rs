//! Layered configuration loading.

use std::path::Path;

use super::env::EnvSource;
use super::file::FileSource;
use super::overrides::OverrideSource;
use super::source::{deep_merge, ConfigSource};
use super::{Config, ConfigError};
use crate::value::Value;

/// Builder assembling a [`Config`] from layered sources.
///
/// Sources are applied in registration order, with later sources overriding
/// earlier ones. Whole documents deep-merge (nested tables merge
/// recursively, other values are replaced entirely); path-scoped entries
/// such as environment variables and command-line overrides go through the
/// same authoritative write as [`Config::set`].
///
/// ## Example
///
/// ```no_run
/// use dragon_conf::Config;
///
/// // defaults -> env overrides -> CLI override wins
/// let config = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_file("config/local.toml", false)
///     .with_env("MYAPP", "__")
///     .with_override("resources.pool.size:4")
///     .build()?;
/// # Ok::<(), dragon_conf::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new builder for layered loading.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl ConfigBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't
    /// exist. Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(Box::new(FileSource::new(path, required)));
        self
    }

    /// Loads overrides from environment variables with the given prefix.
    ///
    /// Variable names are mapped to paths by stripping the prefix, splitting
    /// on the separator, and lowercasing the segments; values are classified
    /// with the same grammar as [`parse_set_argument`](super::parse_set_argument).
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.sources.push(Box::new(EnvSource::new(prefix, separator)));
        self
    }

    /// Adds a single `path:value` override, as supplied on a command line.
    ///
    /// The argument is parsed at build time, so a malformed override
    /// surfaces from [`build`](Self::build) rather than here.
    pub fn with_override(mut self, argument: impl Into<String>) -> Self {
        self.sources.push(Box::new(OverrideSource::new(argument)));
        self
    }

    /// Adds a custom source to the pipeline.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Builds the configuration by loading and applying every source.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut config = Config::new();

        for source in &self.sources {
            tracing::debug!(?source, "applying config source");
            for entry in source.entries()? {
                if entry.path.is_empty() {
                    if let Value::Table(overlay) = entry.value {
                        deep_merge(config.table_mut(), overlay);
                    }
                } else {
                    let segments: Vec<&str> =
                        entry.path.iter().map(String::as_str).collect();
                    config.set(entry.value, &segments);
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_build_merges_files_in_order() {
        let base = write_file(
            r#"
            domain = "staging"

            [meta]
            owner = "ops"
            email = "ops@example.net"
            "#,
        );
        let local = write_file(
            r#"
            [meta]
            email = "oncall@example.net"
            "#,
        );

        let config = Config::builder()
            .with_file(base.path(), true)
            .with_file(local.path(), false)
            .build()
            .unwrap();

        assert_eq!(config.get_string(&["domain"]).unwrap(), "staging");
        assert_eq!(config.get_string(&["meta", "owner"]).unwrap(), "ops");
        assert_eq!(
            config.get_string(&["meta", "email"]).unwrap(),
            "oncall@example.net"
        );
    }

    #[test]
    fn test_build_applies_overrides_last() {
        let base = write_file("[limits]\nworkers = 2\n");

        let config = Config::builder()
            .with_file(base.path(), true)
            .with_override("limits.workers:8")
            .build()
            .unwrap();

        assert_eq!(config.get_int(&["limits", "workers"]).unwrap(), 8);
    }

    #[test]
    fn test_build_required_file_missing_fails() {
        let result = Config::builder()
            .with_file("/nonexistent/config.toml", true)
            .build();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_build_malformed_override_fails() {
        let result = Config::builder().with_override("no-separator").build();

        assert!(matches!(result, Err(ConfigError::InvalidOverride(_))));
    }

    #[test]
    fn test_build_env_layer() {
        std::env::set_var("DRAGON_CONF_BUILDTEST__LIMITS__WORKERS", "6");

        let base = write_file("[limits]\nworkers = 2\n");
        let config = Config::builder()
            .with_file(base.path(), true)
            .with_env("DRAGON_CONF_BUILDTEST", "__")
            .build()
            .unwrap();

        assert_eq!(config.get_int(&["limits", "workers"]).unwrap(), 6);

        std::env::remove_var("DRAGON_CONF_BUILDTEST__LIMITS__WORKERS");
    }
}
