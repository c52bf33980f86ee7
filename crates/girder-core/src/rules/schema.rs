use crate::error::GirderError;
use crate::model::{Conditions, Consequence, FieldValue};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single recommendation rule: when every condition holds, recommend the
/// consequence.
///
/// Persisted as `{"if": {...}, "then": {...}}`. Both maps are non-empty;
/// construct through [`Rule::new`] or [`validate_rule`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    #[serde(rename = "if")]
    conditions: Conditions,
    #[serde(rename = "then")]
    consequence: Consequence,
}

impl Rule {
    pub fn new(conditions: Conditions, consequence: Consequence) -> Result<Rule, GirderError> {
        if conditions.is_empty() {
            return Err(GirderError::RuleInvalid("'if' must not be empty".into()));
        }
        if consequence.is_empty() {
            return Err(GirderError::RuleInvalid("'then' must not be empty".into()));
        }
        for (key, fields) in [("if", &conditions), ("then", &consequence)] {
            if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(GirderError::RuleInvalid(format!(
                    "'{}' field '{}' has non-finite value {}, which JSON cannot store",
                    key, field, value
                )));
            }
        }
        Ok(Rule {
            conditions,
            consequence,
        })
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn consequence(&self) -> &Consequence {
        &self.consequence
    }
}

/// Structural check of a candidate rule record.
///
/// Requires an object with `if` and `then` keys, each a non-empty mapping.
/// Field names and value types are not checked: values outside the string,
/// number and `[low, high]` shapes are kept as [`FieldValue::Other`].
pub fn validate_rule(candidate: &Value) -> Result<Rule, GirderError> {
    let obj = candidate
        .as_object()
        .ok_or_else(|| GirderError::RuleInvalid("rule must be a JSON object".into()))?;

    let conditions = section(obj, "if")?;
    let consequence = section(obj, "then")?;
    Rule::new(conditions, consequence)
}

fn section(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<BTreeMap<String, FieldValue>, GirderError> {
    let value = obj.get(key).ok_or_else(|| {
        GirderError::RuleInvalid(format!(
            "rule must contain '{}'. Rules need both 'if' (mapping) and 'then' (mapping)",
            key
        ))
    })?;

    let map = value.as_object().ok_or_else(|| {
        GirderError::RuleInvalid(format!("'{}' must be a mapping of field names to values", key))
    })?;

    let mut out = BTreeMap::new();
    for (field, v) in map {
        let parsed: FieldValue = serde_json::from_value(v.clone())?;
        out.insert(field.clone(), parsed);
    }
    Ok(out)
}
