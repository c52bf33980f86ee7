use girder_core::error::GirderError;
use girder_core::model::Criteria;
use girder_core::recommend::{Mismatch, Recommendation};
use serde_json::json;

pub fn print_evaluation(
    criteria: &Criteria,
    recommendation: &Recommendation,
    mismatches: Option<&[Mismatch]>,
) -> Result<(), GirderError> {
    let mut report = json!({
        "criteria": criteria,
        "exact_match": recommendation.exact_match,
        "suggestion": recommendation.suggestion,
        "match_score": recommendation.match_score,
    });
    if let Some(mismatches) = mismatches {
        report["mismatches"] = serde_json::to_value(mismatches)?;
    }

    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
