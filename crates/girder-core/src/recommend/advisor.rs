use crate::model::Criteria;
use crate::recommend::outcome::Mismatch;
use crate::rules::schema::Rule;

/// List, for every rule, the criteria fields that contradict it.
///
/// Only fields present in both the rule and the criteria are compared, using
/// plain equality (a threshold condition always counts as a mismatch). Rules
/// with no contradicting field are left out. Output follows store order;
/// within each entry, `mismatched_keys` are sorted by field name, not by the
/// order the rule's conditions were written in.
pub fn suggest_improvements(criteria: &Criteria, rules: &[Rule]) -> Vec<Mismatch> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(rule_index, rule)| {
            let correct_values: Vec<_> = rule
                .conditions()
                .iter()
                .filter(|(key, expected)| {
                    criteria
                        .get(*key)
                        .is_some_and(|actual| actual != *expected)
                })
                .map(|(key, expected)| (key.clone(), expected.clone()))
                .collect();

            if correct_values.is_empty() {
                return None;
            }

            Some(Mismatch {
                rule_index,
                rule: rule.consequence().clone(),
                mismatched_keys: correct_values.iter().map(|(k, _)| k.clone()).collect(),
                correct_values: correct_values.into_iter().collect(),
            })
        })
        .collect()
}
