use std::path::PathBuf;

use droidres::{Config, remove_english_duplicates};

use crate::output::emit;

/// Run the remove-english command: drop translations identical to the baseline.
pub fn run_remove_english_command(
    config: &Config,
    res_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let res_dir = res_dir.unwrap_or_else(|| config.prune_resources_dir.clone());
    let report = remove_english_duplicates(&res_dir, &config.baseline_dir, &config.file_name)
        .map_err(|e| e.to_string())?;

    emit(&report, json, |report| {
        let removed: usize = report.pruned.iter().map(|file| file.removed.len()).sum();
        println!(
            "Removed {} English duplicates from {} of {} files",
            removed,
            report.pruned.len(),
            report.files_scanned
        );
        if !report.missing_from_baseline.is_empty() {
            println!(
                "{} strings are missing from {}",
                report.missing_from_baseline.len(),
                report.baseline.display()
            );
        }
    })
}
