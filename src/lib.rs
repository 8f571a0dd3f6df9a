pub mod config;
mod error;
pub mod json;
pub mod net;
pub mod value;

pub use config::{
    parse_set_argument, Config, ConfigBuilder, ConfigEntry, ConfigError, ConfigSource, EnvSource,
    FileSource, Rule, RuleSet, Violation,
};
pub use error::Error;
pub use json::to_json_reader;
pub use net::resolve_domain_name;
pub use value::{Datetime, Kind, Table, Value};
