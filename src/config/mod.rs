//! Configuration tree loading, access, and validation.

mod access;
mod builder;
mod env;
mod error;
mod file;
mod io;
mod overrides;
mod source;
mod tree;
mod validate;

pub use builder::ConfigBuilder;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use overrides::parse_set_argument;
pub use source::{ConfigEntry, ConfigSource};
pub use tree::Config;
pub use validate::{Rule, RuleSet, Violation};
