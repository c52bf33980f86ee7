use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Input values keyed by rule field name, supplied for a single evaluation.
pub type Criteria = BTreeMap<String, FieldValue>;

/// A rule's expected input values, keyed by field name.
pub type Conditions = BTreeMap<String, FieldValue>;

/// A rule's recommended outputs, keyed by output field name.
pub type Consequence = BTreeMap<String, FieldValue>;

/// Output fields of the construction rule set. Used to shape the "N/A"
/// placeholder when a store has no rules to borrow field names from.
pub const DEFAULT_OUTPUT_FIELDS: &[&str] =
    &["Concrete Grade", "Steel Diameter (mm)", "Beam Size (mm)"];

/// A loosely typed field value, as found in rule conditions, consequences
/// and criteria.
///
/// Serialized untagged: a JSON integer, float, string, or `[low, high]` pair.
/// Any other JSON value (bool, null, object, longer array) is kept as-is in
/// `Other` and compared by plain JSON equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Range(i64, i64),
    Other(serde_json::Value),
}

impl FieldValue {
    /// The `">{value}"` marker that a threshold condition must spell out
    /// literally to be satisfied by this value.
    pub fn threshold_marker(&self) -> FieldValue {
        FieldValue::Text(format!(">{self}"))
    }

    /// True for text values written as an open-ended `>N` bound.
    pub fn is_threshold(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.starts_with('>'))
    }

    /// False only for NaN and infinite floats, which JSON cannot represent.
    pub fn is_finite(&self) -> bool {
        match self {
            FieldValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Integer(i), FieldValue::Float(f))
            | (FieldValue::Float(f), FieldValue::Integer(i)) => integer_equals_float(*i, *f),
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Range(a_lo, a_hi), FieldValue::Range(b_lo, b_hi)) => {
                a_lo == b_lo && a_hi == b_hi
            }
            (FieldValue::Other(a), FieldValue::Other(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison: the float must be whole and inside the i64 range, so no
/// rounding happens on either side.
fn integer_equals_float(i: i64, f: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 && f as i64 == i
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" on whole floats.
            FieldValue::Float(v) => write!(f, "{v:?}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Range(lo, hi) => write!(f, "({lo}, {hi})"),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<(i64, i64)> for FieldValue {
    fn from((lo, hi): (i64, i64)) -> Self {
        FieldValue::Range(lo, hi)
    }
}

/// How raw text for a site field is coerced before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// A single integer or a `low-high` range.
    IntegerOrRange,
}

/// The known site-condition inputs of the construction rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteField {
    SoilType,
    LoadBearingCapacity,
    MoistureContent,
    Floors,
    Area,
    WindSpeed,
    Environment,
}

impl SiteField {
    pub const ALL: [SiteField; 7] = [
        SiteField::SoilType,
        SiteField::LoadBearingCapacity,
        SiteField::MoistureContent,
        SiteField::Floors,
        SiteField::Area,
        SiteField::WindSpeed,
        SiteField::Environment,
    ];

    /// Field name as it appears in rule conditions.
    pub fn name(self) -> &'static str {
        match self {
            SiteField::SoilType => "Soil Type",
            SiteField::LoadBearingCapacity => "Load-Bearing Capacity (kPa)",
            SiteField::MoistureContent => "Moisture Content (%)",
            SiteField::Floors => "Floors",
            SiteField::Area => "Area (sq. m)",
            SiteField::WindSpeed => "Wind Speed (km/h)",
            SiteField::Environment => "Environment",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            SiteField::SoilType | SiteField::Environment => FieldKind::Text,
            SiteField::WindSpeed => FieldKind::IntegerOrRange,
            _ => FieldKind::Integer,
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            SiteField::SoilType => &["soil_type", "soiltype", "soil"],
            SiteField::LoadBearingCapacity => &[
                "loadbearingcapacity",
                "load_bearing_capacity",
                "load_capacity",
                "loadcapacity",
            ],
            SiteField::MoistureContent => &["moisturecontent", "moisture_content", "moisture"],
            SiteField::Floors => &["floors"],
            SiteField::Area => &["area"],
            SiteField::WindSpeed => &["windspeed", "wind_speed", "wind"],
            SiteField::Environment => &["environment"],
        }
    }

    /// Resolve a caller-supplied key: the canonical rule field name, or one
    /// of the camelCase / snake_case input spellings (case-insensitive).
    pub fn from_key_loose(key: &str) -> Option<SiteField> {
        let key = key.trim();
        let lower = key.to_lowercase();
        SiteField::ALL.into_iter().find(|field| {
            field.name().eq_ignore_ascii_case(key) || field.aliases().contains(&lower.as_str())
        })
    }
}

impl fmt::Display for SiteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
