use crate::error::GirderError;
use crate::rules::schema::Rule;
use crate::rules::parse_rules;
use std::path::Path;

const CONSTRUCTION_DEFAULTS_JSON: &str = include_str!("../../../../rules/construction-defaults.json");

/// The embedded construction rule set, in store order.
pub fn default_rules() -> Result<Vec<Rule>, GirderError> {
    parse_rules(CONSTRUCTION_DEFAULTS_JSON, Path::new("<builtin>"))
}
