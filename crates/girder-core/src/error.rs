use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GirderError {
    #[error("rule file not found: {path}")]
    RulesNotFound { path: PathBuf },

    #[error("failed to load rules from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid rule: {0}")]
    RuleInvalid(String),

    #[error("rules changed in memory but could not be saved to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },

    #[error("no rule at index {index} (store has {len} rules)")]
    RuleIndex { index: usize, len: usize },

    #[error("error during preprocessing: {0}")]
    Preprocess(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
