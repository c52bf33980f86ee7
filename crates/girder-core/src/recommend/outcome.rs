use crate::model::{Consequence, FieldValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of evaluating criteria against a rule store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Consequence of the first rule whose conditions all hold.
    pub exact_match: Option<Consequence>,
    /// Best partial match, present only when there is no exact match.
    /// All fields are "N/A" when no rule shares a condition with the criteria.
    pub suggestion: Option<Consequence>,
    /// Number of conditions the suggestion's rule shares with the criteria.
    /// Always 0 for an exact match.
    pub match_score: usize,
}

impl Recommendation {
    pub fn exact(consequence: Consequence) -> Recommendation {
        Recommendation {
            exact_match: Some(consequence),
            suggestion: None,
            match_score: 0,
        }
    }

    pub fn fallback(consequence: Consequence, score: usize) -> Recommendation {
        Recommendation {
            exact_match: None,
            suggestion: Some(consequence),
            match_score: score,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.exact_match.is_some()
    }

    /// Whichever consequence is present: the exact match, else the suggestion.
    pub fn consequence(&self) -> Option<&Consequence> {
        self.exact_match.as_ref().or(self.suggestion.as_ref())
    }
}

/// Why one rule did not match: the criteria fields that disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// Position of the rule in the store.
    pub rule_index: usize,
    /// The rule's consequence.
    pub rule: Consequence,
    /// Fields present in both the rule and the criteria whose values differ.
    pub mismatched_keys: Vec<String>,
    /// The rule's expected value for each mismatched field.
    pub correct_values: BTreeMap<String, FieldValue>,
}
