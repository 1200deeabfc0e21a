//! Role-based access policy.
//!
//! Rules are `(subject, object, action)` triples and roles may inherit from other roles.
//! The file format is the casbin CSV dialect:
//!
//! ```text
//! # rules
//! p, anonymous, /login, POST
//! p, user, /movie, GET
//! # admin inherits every user rule
//! g, admin, user
//! ```
//!
//! Anything not explicitly allowed is denied.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

/// Longest inheritance chain evaluated before giving up.
pub const MAX_ROLE_DEPTH: usize = 10;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid policy line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Role hierarchy of '{0}' is deeper than {MAX_ROLE_DEPTH} levels")]
    RoleDepth(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    subject: String,
    object: String,
    action: String,
}

#[derive(Debug, Default)]
pub struct Policy {
    rules: Vec<Rule>,
    parents: HashMap<String, Vec<String>>,
}

impl Policy {
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let text = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let policy = Self::parse(&text)?;
        info!(
            rules = policy.rules.len(),
            roles = policy.parents.len(),
            "Loaded access policy from {}",
            path.display()
        );
        Ok(policy)
    }

    pub fn parse(text: &str) -> Result<Self, PolicyError> {
        let mut policy = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let parse_err = |message: &str| PolicyError::Parse {
                line: index + 1,
                message: message.to_string(),
            };

            if fields.iter().any(|f| f.is_empty()) {
                return Err(parse_err("empty field"));
            }

            match fields.as_slice() {
                ["p", subject, object, action] => policy.rules.push(Rule {
                    subject: (*subject).to_string(),
                    object: (*object).to_string(),
                    action: action.to_ascii_uppercase(),
                }),
                ["g", role, parent] => policy
                    .parents
                    .entry((*role).to_string())
                    .or_default()
                    .push((*parent).to_string()),
                ["p", ..] => return Err(parse_err("expected `p, subject, object, action`")),
                ["g", ..] => return Err(parse_err("expected `g, role, parent`")),
                _ => return Err(parse_err("unknown line type")),
            }
        }

        Ok(policy)
    }

    /// Decides whether `subject` may perform `action` on `object`.
    ///
    /// The subject's own rules are checked first, then each inherited role level in turn.
    pub fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, PolicyError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut level: Vec<&str> = vec![subject];

        for _ in 0..=MAX_ROLE_DEPTH {
            let mut next = Vec::new();

            for role in level {
                if !visited.insert(role) {
                    continue;
                }

                if self.allows(role, object, action) {
                    debug!(subject, role, object, action, "Policy allowed");
                    return Ok(true);
                }

                if let Some(parents) = self.parents.get(role) {
                    next.extend(parents.iter().map(String::as_str));
                }
            }

            next.retain(|role| !visited.contains(role));
            if next.is_empty() {
                return Ok(false);
            }
            level = next;
        }

        Err(PolicyError::RoleDepth(subject.to_string()))
    }

    fn allows(&self, role: &str, object: &str, action: &str) -> bool {
        self.rules.iter().any(|rule| {
            rule.subject == role && rule.object == object && rule.action.eq_ignore_ascii_case(action)
        })
    }
}
