use girder_core::error::GirderError;
use girder_core::rules::RuleStore;
use std::path::Path;

use crate::output::table;

pub fn list(rules_path: &Path) -> Result<(), GirderError> {
    let store = RuleStore::load(rules_path)?;

    println!("{} rule(s) in {}\n", store.len(), rules_path.display());
    for (i, rule) in store.rules().iter().enumerate() {
        println!("  #{}  then {}", i, table::summary(rule.consequence()));
        table::print_fields(rule.conditions(), "        ");
        println!();
    }
    Ok(())
}

pub fn add(rules_path: &Path, file: &Path) -> Result<(), GirderError> {
    let mut store = RuleStore::load(rules_path)?;
    let candidate: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;

    store.add(&candidate)?;

    println!("Rule successfully added to the knowledge base.");
    println!("  Position: #{} of {}", store.len() - 1, store.len());
    Ok(())
}

pub fn remove(rules_path: &Path, index: usize) -> Result<(), GirderError> {
    let mut store = RuleStore::load(rules_path)?;
    let removed = store.remove(index)?;
    println!(
        "Removed rule #{} ({}). {} rule(s) remain.",
        index,
        table::summary(removed.consequence()),
        store.len()
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), GirderError> {
    let store = RuleStore::load(file)?;

    println!("Rule file '{}' is valid.", file.display());
    println!("  Rules: {}", store.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for (i, rule) in store.rules().iter().enumerate() {
        for (j, earlier) in store.rules()[..i].iter().enumerate() {
            if earlier.conditions() == rule.conditions() {
                warnings.push(format!(
                    "rule #{} has the same conditions as rule #{} and can never match exactly",
                    i, j
                ));
                break;
            }
        }
        for (key, value) in rule.conditions() {
            if value.is_threshold() {
                warnings.push(format!(
                    "rule #{} field '{}' uses threshold '{}', which only matches that exact value",
                    i, key, value
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

pub fn init(rules_path: &Path, force: bool) -> Result<(), GirderError> {
    if rules_path.exists() && !force {
        return Err(GirderError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", rules_path.display()),
        )));
    }
    if let Some(parent) = rules_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let store = RuleStore::with_defaults(rules_path)?;
    store.save()?;
    println!(
        "Wrote {} built-in rule(s) to {}",
        store.len(),
        rules_path.display()
    );
    Ok(())
}

pub fn schema() -> Result<(), GirderError> {
    print!(
        r#"Rule File Format
================

A rule file is a JSON array of rules. `girder evaluate` checks the rules
in file order: the first rule whose conditions all hold is the recommended
design. If none holds, the rule sharing the most condition values with the
input is offered as a suggestion, with that count as its match score
(earlier rules win ties).

Each rule:
  if            (object, required)  Conditions: field name -> expected value.
                                    Must not be empty.
  then          (object, required)  Recommendation: output field -> value.
                                    Must not be empty.

Values are usually strings, integers, decimals, or [low, high] integer
pairs. Any other JSON value (true, null, objects) is accepted and only
matches an identical value.
Field names are free-form; the built-in site fields are:
  Soil Type, Load-Bearing Capacity (kPa), Moisture Content (%), Floors,
  Area (sq. m), Wind Speed (km/h), Environment

Threshold values: a condition written as ">N" (e.g. ">2000") is satisfied
only by the input value N itself, not by every value above N. It never
counts towards the match score.

Example:
[
    {{
        "if": {{
            "Soil Type": "Clay",
            "Floors": 2,
            "Environment": "Normal"
        }},
        "then": {{
            "Concrete Grade": "M20",
            "Steel Diameter (mm)": "12 (Main), 8 (Secondary)",
            "Beam Size (mm)": "230 x 300"
        }}
    }}
]

Add a single rule object with `girder rules add <FILE>`.
"#
    );
    Ok(())
}
