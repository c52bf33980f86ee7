pub mod error;
pub mod feedback;
pub mod model;
pub mod parsing;
pub mod recommend;
pub mod rules;

use error::GirderError;
use model::Criteria;
use recommend::Recommendation;
use rules::RuleStore;
use std::collections::BTreeMap;

/// Main API entry point: preprocess raw form input and evaluate it.
///
/// Raw values are coerced to typed criteria first; a malformed value fails
/// with `GirderError::Preprocess` before any rule is consulted.
pub fn recommend(
    raw: &BTreeMap<String, String>,
    store: &RuleStore,
) -> Result<(Criteria, Recommendation), GirderError> {
    let criteria = parsing::preprocess_input(raw)?;
    let recommendation = store.evaluate(&criteria);
    Ok((criteria, recommendation))
}
