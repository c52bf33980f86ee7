pub mod builtin;
pub mod schema;

use crate::error::GirderError;
use crate::model::Criteria;
use crate::recommend::{self, Mismatch, Recommendation};
use schema::{validate_rule, Rule};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Parse a JSON array of rule records, validating each one.
pub fn parse_rules(json: &str, source: &Path) -> Result<Vec<Rule>, GirderError> {
    let records: Vec<Value> = serde_json::from_str(json).map_err(|e| GirderError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            validate_rule(record).map_err(|e| GirderError::RulesLoad {
                path: source.to_path_buf(),
                reason: format!("rule #{}: {}", i, e),
            })
        })
        .collect()
}

/// Structural check only; see [`schema::validate_rule`] for the reason on failure.
pub fn is_valid_rule(candidate: &Value) -> bool {
    validate_rule(candidate).is_ok()
}

/// An ordered, file-backed rule collection.
///
/// Every mutation is written through to the backing file before it returns.
/// Rule order is significant: exact matching and score ties both favour the
/// earliest rule.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
    rules: Vec<Rule>,
}

impl RuleStore {
    /// An empty store bound to `path`. Nothing is written until the first mutation.
    pub fn new(path: impl Into<PathBuf>) -> RuleStore {
        RuleStore {
            path: path.into(),
            rules: Vec::new(),
        }
    }

    /// A store seeded with the embedded construction rules, not yet saved.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Result<RuleStore, GirderError> {
        Ok(RuleStore {
            path: path.into(),
            rules: builtin::default_rules()?,
        })
    }

    /// Load rules from a JSON file.
    pub fn load(path: impl Into<PathBuf>) -> Result<RuleStore, GirderError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GirderError::RulesNotFound { path: path.clone() }
            } else {
                GirderError::RulesLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            }
        })?;
        let rules = parse_rules(&content, &path)?;
        info!(path = %path.display(), rules = rules.len(), "loaded rule store");
        Ok(RuleStore { path, rules })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Write the whole rule sequence to the backing file.
    ///
    /// The JSON is written to a temporary file in the same directory and
    /// renamed over the target, so readers see either the old or the new file.
    pub fn save(&self) -> Result<(), GirderError> {
        self.write_file().map_err(|reason| {
            warn!(path = %self.path.display(), %reason, "failed to save rule store");
            GirderError::Persist {
                path: self.path.clone(),
                reason,
            }
        })?;
        info!(path = %self.path.display(), rules = self.rules.len(), "saved rule store");
        Ok(())
    }

    fn write_file(&self) -> Result<(), String> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| e.to_string())?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut tmp, formatter);
        self.rules.serialize(&mut ser).map_err(|e| e.to_string())?;
        tmp.write_all(b"\n").map_err(|e| e.to_string())?;
        // The temp file is created owner-only; keep the mode of the file it replaces.
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| e.to_string())?;
        }
        tmp.as_file().sync_all().map_err(|e| e.to_string())?;
        tmp.persist(&self.path).map_err(|e| e.error.to_string())?;
        Ok(())
    }

    /// Validate a candidate rule record, append it and save.
    ///
    /// On `RuleInvalid` the store is unchanged. On `Persist` the rule stays
    /// in memory at the end of the sequence but is not durable.
    pub fn add(&mut self, candidate: &Value) -> Result<(), GirderError> {
        let rule = validate_rule(candidate)?;
        self.add_rule(rule)
    }

    /// Append an already-validated rule and save.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), GirderError> {
        self.rules.push(rule);
        debug!(rules = self.rules.len(), "appended rule");
        self.save()
    }

    /// Remove the rule at `index` and save. Later rules move up one position.
    pub fn remove(&mut self, index: usize) -> Result<Rule, GirderError> {
        if index >= self.rules.len() {
            return Err(GirderError::RuleIndex {
                index,
                len: self.rules.len(),
            });
        }
        let removed = self.rules.remove(index);
        debug!(index, rules = self.rules.len(), "removed rule");
        self.save()?;
        Ok(removed)
    }

    /// Evaluate criteria against the current rule sequence.
    pub fn evaluate(&self, criteria: &Criteria) -> Recommendation {
        recommend::evaluate(criteria, &self.rules)
    }

    /// Per-rule mismatch diagnostics for criteria, in store order.
    pub fn suggest_improvements(&self, criteria: &Criteria) -> Vec<Mismatch> {
        recommend::suggest_improvements(criteria, &self.rules)
    }
}
