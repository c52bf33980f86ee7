use girder_core::model::{Consequence, Criteria, FieldValue};
use girder_core::recommend::{Mismatch, Recommendation};
use std::collections::BTreeMap;

pub fn print_evaluation(
    criteria: &Criteria,
    recommendation: &Recommendation,
    mismatches: Option<&[Mismatch]>,
) {
    println!("=== Site conditions ===\n");
    print_fields(criteria, "  ");
    println!();

    match (&recommendation.exact_match, &recommendation.suggestion) {
        (Some(design), _) => {
            println!("=== Recommended design ===\n");
            print_fields(design, "  ");
        }
        (None, Some(suggestion)) => {
            println!("=== No exact match found ===\n");
            if recommendation.match_score == 0 {
                println!("  No rule shares any condition with these site parameters.");
            } else {
                println!(
                    "  Closest suggestion ({} matching condition{}):\n",
                    recommendation.match_score,
                    if recommendation.match_score == 1 { "" } else { "s" }
                );
            }
            print_fields(suggestion, "  ");
        }
        (None, None) => println!("  No recommendation available."),
    }
    println!();

    if let Some(mismatches) = mismatches {
        print_mismatches(criteria, mismatches);
    }
}

fn print_mismatches(criteria: &Criteria, mismatches: &[Mismatch]) {
    if mismatches.is_empty() {
        println!("No rule disagrees with the given parameters.\n");
        return;
    }

    println!("=== Rules that disagree ===\n");
    for m in mismatches {
        println!("  Rule #{} -> {}", m.rule_index, summary(&m.rule));
        for key in &m.mismatched_keys {
            let given = criteria
                .get(key)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let expected = &m.correct_values[key];
            let note = if expected.is_threshold() {
                " (threshold)"
            } else {
                ""
            };
            println!("    {}: given {}, rule expects {}{}", key, given, expected, note);
        }
    }
    println!();
}

/// Print `name: value` lines aligned on the longest field name.
pub fn print_fields(fields: &BTreeMap<String, FieldValue>, indent: &str) {
    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
    for (name, value) in fields {
        println!("{indent}{:<width$}  {}", format!("{name}:"), value, width = width + 1);
    }
}

/// One-line rendering of a consequence.
pub fn summary(consequence: &Consequence) -> String {
    consequence
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
