pub mod advisor;
pub mod engine;
pub mod outcome;

pub use advisor::suggest_improvements;
pub use engine::{evaluate, exact_match, find_closest_match, score_rule};
pub use outcome::{Mismatch, Recommendation};
