use girder_core::error::GirderError;
use girder_core::model::SiteField;
use girder_core::rules::RuleStore;
use std::collections::BTreeMap;
use std::path::Path;

use crate::output;

/// Raw site parameters as typed on the command line.
pub struct SiteInput {
    pub soil_type: Option<String>,
    pub load_capacity: Option<String>,
    pub moisture: Option<String>,
    pub floors: Option<String>,
    pub area: Option<String>,
    pub wind_speed: Option<String>,
    pub environment: Option<String>,
    pub extra: Vec<String>,
}

impl SiteInput {
    fn into_raw(self) -> Result<BTreeMap<String, String>, GirderError> {
        let known = [
            (SiteField::SoilType, self.soil_type),
            (SiteField::LoadBearingCapacity, self.load_capacity),
            (SiteField::MoistureContent, self.moisture),
            (SiteField::Floors, self.floors),
            (SiteField::Area, self.area),
            (SiteField::WindSpeed, self.wind_speed),
            (SiteField::Environment, self.environment),
        ];

        let mut raw: BTreeMap<String, String> = known
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field.name().to_string(), v)))
            .collect();

        for pair in self.extra {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                GirderError::Preprocess(format!("expected FIELD=VALUE, got '{}'", pair))
            })?;
            raw.insert(key.trim().to_string(), value.to_string());
        }

        if raw.is_empty() {
            return Err(GirderError::Preprocess(
                "no site parameters given. Pass e.g. --soil-type Clay --floors 2".into(),
            ));
        }
        Ok(raw)
    }
}

pub fn run(
    rules_path: &Path,
    input: SiteInput,
    builtin: bool,
    explain: bool,
    output_format: &str,
) -> Result<(), GirderError> {
    let store = if builtin {
        RuleStore::with_defaults(rules_path)?
    } else {
        RuleStore::load(rules_path)?
    };

    let (criteria, recommendation) = girder_core::recommend(&input.into_raw()?, &store)?;
    let mismatches = if explain {
        Some(store.suggest_improvements(&criteria))
    } else {
        None
    };

    match output_format {
        "json" => output::json::print_evaluation(&criteria, &recommendation, mismatches.as_deref())?,
        _ => output::table::print_evaluation(&criteria, &recommendation, mismatches.as_deref()),
    }

    Ok(())
}
