//! Structural validation of a configuration tree.
//!
//! Rules are data, not code: a [`RuleSet`] is a declarative list of
//! path-pattern rules plus optional whole-config checks, and
//! [`Config::validate`] evaluates them uniformly. The pass itself cannot
//! fail; it collects every violation and returns the full list.

use std::fmt;

use crate::value::{Kind, Value};

use super::Config;

/// One structural problem found during validation: where, and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Any,
}

type Predicate = dyn Fn(&Value) -> Result<(), String> + Send + Sync;
type ConfigCheck = dyn Fn(&Config) -> Vec<Violation> + Send + Sync;

/// A single declarative rule: a dotted path pattern (`*` matches every key
/// of the table at that level), and what must hold where it resolves.
///
/// ```
/// use dragon_conf::{Kind, Rule};
///
/// let rule = Rule::new("resources.*.provider").required().kind(Kind::String);
/// ```
#[must_use = "rules do nothing until added to a RuleSet"]
pub struct Rule {
    pattern: Vec<Segment>,
    required: bool,
    kind: Option<Kind>,
    predicate: Option<Box<Predicate>>,
}

impl Rule {
    /// Parses a dotted pattern. `*` segments match every key present at
    /// that level; empty segments are ignored.
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    Segment::Any
                } else {
                    Segment::Key(s.to_string())
                }
            })
            .collect();
        Self {
            pattern,
            required: false,
            kind: None,
            predicate: None,
        }
    }

    /// Requires the path to resolve; absence becomes a violation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Requires every resolved value to be of `kind`.
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attaches a per-value predicate, run after the kind check passes.
    /// The returned message becomes the violation text.
    pub fn ensure(
        mut self,
        predicate: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    fn apply(&self, root: &Value, out: &mut Vec<Violation>) {
        self.walk(root, &self.pattern, String::new(), out);
    }

    fn walk(&self, current: &Value, remaining: &[Segment], at: String, out: &mut Vec<Violation>) {
        let Some((segment, rest)) = remaining.split_first() else {
            self.inspect(current, &at, out);
            return;
        };

        match segment {
            Segment::Key(key) => {
                let next_at = join(&at, key);
                match current.as_table().and_then(|table| table.get(key)) {
                    Some(child) => self.walk(child, rest, next_at, out),
                    None => {
                        if self.required {
                            out.push(Violation::new(
                                pending(&next_at, rest),
                                "required value is missing",
                            ));
                        }
                    }
                }
            }
            // Wildcards expand over the keys actually present; a non-table
            // here yields no matches. Pair with a kind rule on the parent
            // to require the table itself.
            Segment::Any => {
                if let Some(table) = current.as_table() {
                    for (key, child) in table {
                        self.walk(child, rest, join(&at, key), out);
                    }
                }
            }
        }
    }

    fn inspect(&self, value: &Value, at: &str, out: &mut Vec<Violation>) {
        if let Some(expected) = self.kind {
            if value.kind() != expected {
                out.push(Violation::new(
                    at,
                    format!("expected {expected}, found {}", value.kind()),
                ));
                return;
            }
        }
        if let Some(predicate) = &self.predicate {
            if let Err(message) = predicate(value) {
                out.push(Violation::new(at, message));
            }
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// The declared shape of an acceptable configuration.
///
/// Extending the schema means adding rules or checks here, not new code in
/// the validator.
#[derive(Default)]
#[must_use = "rule sets do nothing until passed to Config::validate"]
pub struct RuleSet {
    rules: Vec<Rule>,
    checks: Vec<Box<ConfigCheck>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path-pattern rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a whole-config check, for consistency constraints that span
    /// multiple paths. The check returns whatever violations it finds.
    pub fn check(
        mut self,
        check: impl Fn(&Config) -> Vec<Violation> + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Box::new(check));
        self
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules)
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl Config {
    /// Walks the tree against `rules` and returns every violation found.
    ///
    /// An empty result means the configuration is acceptable. A non-empty
    /// one is not fatal by itself; whether to abort or continue with
    /// defaults is the caller's decision, which is why this returns a list
    /// instead of failing on the first problem.
    pub fn validate(&self, rules: &RuleSet) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in &rules.rules {
            rule.apply(self.root(), &mut violations);
        }
        for check in &rules.checks {
            violations.extend(check(self));
        }

        tracing::debug!(violations = violations.len(), "validation finished");
        violations
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{at}.{key}")
    }
}

/// Renders the unvisited tail of a pattern after the point of absence, so a
/// missing `resources` under the pattern `resources.*.provider` reports the
/// full declared path.
fn pending(at: &str, rest: &[Segment]) -> String {
    let mut path = at.to_string();
    for segment in rest {
        path.push('.');
        match segment {
            Segment::Key(key) => path.push_str(key),
            Segment::Any => path.push('*'),
        }
    }
    path
}
