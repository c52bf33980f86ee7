use girder_core::error::GirderError;
use girder_core::feedback::{FeedbackEntry, FeedbackLog, Rating};
use std::path::Path;

use crate::RatingArg;

pub fn run(
    log_path: &Path,
    rating: RatingArg,
    role: String,
    note: Option<String>,
) -> Result<(), GirderError> {
    let rating = match rating {
        RatingArg::Positive => Rating::Positive,
        RatingArg::Negative => Rating::Negative,
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let log = FeedbackLog::new(log_path);
    log.record(&FeedbackEntry { rating, role, note })?;

    let total = log.entries()?.len();
    println!(
        "Feedback recorded ({} entr{} in {}).",
        total,
        if total == 1 { "y" } else { "ies" },
        log.path().display()
    );
    Ok(())
}
