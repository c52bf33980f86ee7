pub mod values;

use crate::error::GirderError;
use crate::model::{Criteria, SiteField};
use std::collections::BTreeMap;

/// Convert raw text input into typed criteria.
///
/// Keys may be canonical rule field names ("Floors", "Wind Speed (km/h)") or
/// input spellings ("floors", "windSpeed", "load_capacity"); known fields are
/// stored under their canonical name. Numeric fields must parse as integers,
/// and wind speed may also be a "low-high" range. Unknown keys pass through
/// unchanged.
pub fn preprocess_input(raw: &BTreeMap<String, String>) -> Result<Criteria, GirderError> {
    let mut criteria = Criteria::new();

    for (key, text) in raw {
        match SiteField::from_key_loose(key) {
            Some(field) => {
                let value = values::parse_value(field.name(), text, field.kind())?;
                criteria.insert(field.name().to_string(), value);
            }
            None => {
                criteria.insert(key.trim().to_string(), values::infer_value(text));
            }
        }
    }

    Ok(criteria)
}
