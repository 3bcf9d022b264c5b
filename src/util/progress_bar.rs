
use indicatif::{ProgressState, ProgressStyle};

/// Shared function to pull our progress bar styling for batch distance computation
pub fn get_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {bar:40.green/blue} {pos}/{len} pairs ({percent}); ETA: {eta_precise}; Speed: {per_sec} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}%", state.fraction()*100.0);
        })
        .with_key("per_sec", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.0}/s", state.per_sec());
        })
        .progress_chars("##-")
}
