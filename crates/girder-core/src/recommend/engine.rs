use crate::model::{Conditions, Consequence, Criteria, FieldValue, DEFAULT_OUTPUT_FIELDS};
use crate::recommend::outcome::Recommendation;
use crate::rules::schema::Rule;
use std::collections::BTreeSet;
use tracing::debug;

/// Evaluate criteria against rules, preferring an exact match.
///
/// Fallback scoring only runs when no rule matches exactly, so an exact hit
/// always reports a score of 0.
pub fn evaluate(criteria: &Criteria, rules: &[Rule]) -> Recommendation {
    if let Some(consequence) = exact_match(criteria, rules) {
        debug!("exact match found");
        return Recommendation::exact(consequence.clone());
    }

    let (suggestion, score) = find_closest_match(criteria, rules);
    debug!(score, "no exact match, using closest rule");
    Recommendation::fallback(suggestion, score)
}

/// Consequence of the first rule whose every condition is satisfied.
///
/// A condition holds when the criteria value equals the expected value, or
/// when the expected value is literally the `">{value}"` marker of the
/// criteria value. The marker test is a string comparison, not a numeric
/// bound: `">2000"` is satisfied by 2000 and by nothing else.
pub fn exact_match<'a>(criteria: &Criteria, rules: &'a [Rule]) -> Option<&'a Consequence> {
    rules
        .iter()
        .find(|rule| {
            rule.conditions()
                .iter()
                .all(|(key, expected)| match criteria.get(key) {
                    Some(actual) => condition_holds(expected, actual),
                    None => false,
                })
        })
        .map(Rule::consequence)
}

fn condition_holds(expected: &FieldValue, actual: &FieldValue) -> bool {
    actual == expected || *expected == actual.threshold_marker()
}

/// Number of conditions whose expected value equals the criteria value.
///
/// Plain equality only; threshold markers never score.
pub fn score_rule(criteria: &Criteria, conditions: &Conditions) -> usize {
    conditions
        .iter()
        .filter(|(key, expected)| criteria.get(*key) == Some(*expected))
        .count()
}

/// The consequence of the highest-scoring rule and its score.
///
/// Ties go to the earliest rule. When no rule scores above 0, returns a
/// placeholder consequence with every field set to "N/A" and score 0.
pub fn find_closest_match(criteria: &Criteria, rules: &[Rule]) -> (Consequence, usize) {
    let mut best: Option<&Rule> = None;
    let mut highest = 0;

    for rule in rules {
        let score = score_rule(criteria, rule.conditions());
        if score > highest {
            highest = score;
            best = Some(rule);
        }
    }

    match best {
        Some(rule) => (rule.consequence().clone(), highest),
        None => (not_available(rules), 0),
    }
}

/// "N/A" for every output field the store knows about, or for the default
/// construction outputs when the store is empty.
fn not_available(rules: &[Rule]) -> Consequence {
    let mut fields: BTreeSet<&str> = rules
        .iter()
        .flat_map(|r| r.consequence().keys().map(String::as_str))
        .collect();
    if fields.is_empty() {
        fields.extend(DEFAULT_OUTPUT_FIELDS.iter().copied());
    }

    fields
        .into_iter()
        .map(|f| (f.to_string(), FieldValue::from("N/A")))
        .collect()
}
