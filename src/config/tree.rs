//! The configuration tree and its path engine.

use crate::value::{Table, Value};

/// A nested, heterogeneously-typed configuration tree addressed by dotted
/// paths.
///
/// The root is always a table. A `Config` owns its whole value graph:
/// readers get immutable borrows ([`get_path`](Self::get_path)) or defensive
/// copies (the typed accessors); the only mutators are [`set`](Self::set)
/// and [`set_path`](Self::set_path).
///
/// The tree carries no internal synchronization. Build it on one thread,
/// then either share it read-only or guard mixed reads and writes with an
/// external lock.
///
/// ## Example
///
/// ```
/// use dragon_conf::{Config, Value};
///
/// let mut config = Config::new();
/// config.set_path(3i64, "resources.pool.size");
///
/// assert_eq!(
///     config.get_path(&["resources", "pool", "size"]),
///     Some(&Value::Integer(3)),
/// );
/// assert_eq!(config.get_int(&["resources", "pool", "size"]).unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Value,
}

impl Config {
    /// Creates an empty configuration (an empty root table).
    pub fn new() -> Self {
        Self {
            root: Value::Table(Table::new()),
        }
    }

    pub(crate) fn from_table(table: Table) -> Self {
        Self {
            root: Value::Table(table),
        }
    }

    /// Returns the root of the tree, which is always a table.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub(crate) fn table_mut(&mut self) -> &mut Table {
        match &mut self.root {
            Value::Table(table) => table,
            // The root is constructed as a table and no mutator replaces it.
            _ => unreachable!("config root is always a table"),
        }
    }

    /// Returns the value at `path`, or `None` when any segment is missing
    /// or a non-table value sits where the traversal must descend.
    ///
    /// Absence is a normal, silent outcome here; the typed accessors turn
    /// it into [`ConfigError::NotFound`](super::ConfigError::NotFound).
    /// The empty path returns the root itself.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path {
            current = current.as_table()?.get(*segment)?;
        }
        Some(current)
    }

    /// Stores `value` at `path`, creating intermediate tables as needed.
    ///
    /// A non-table value occupying an intermediate segment is overwritten
    /// with a fresh table: overrides are authoritative. The empty path is a
    /// no-op, since there is no parent slot to attach a new root to.
    pub fn set(&mut self, value: impl Into<Value>, path: &[&str]) {
        if path.is_empty() {
            return;
        }
        set_in(self.table_mut(), path, value.into());
    }

    /// [`set`](Self::set) taking the conventional dotted form of a path.
    ///
    /// Empty segments are ignored, so `set_path(v, "")` is the same no-op
    /// as `set(v, &[])`.
    pub fn set_path(&mut self, value: impl Into<Value>, path: &str) {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        self.set(value, &segments);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn set_in(table: &mut Table, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        table.insert((*first).to_string(), value);
        return;
    }

    if !matches!(table.get(*first), Some(Value::Table(_))) {
        table.insert((*first).to_string(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(*first) {
        set_in(nested, rest, value);
    }
}
