use std::path::PathBuf;

use droidres::{Config, merge_translations};

use crate::output::emit;

/// Run the merge command: pull crowd-sourced translations into the resource tree.
pub fn run_merge_command(
    config: &Config,
    crowd_dir: Option<PathBuf>,
    res_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let crowd_dir = crowd_dir.unwrap_or_else(|| config.crowd_dir.clone());
    let res_dir = res_dir.unwrap_or_else(|| config.resources_dir.clone());

    let report = merge_translations(
        &crowd_dir,
        &res_dir,
        &config.file_name,
        &config.protected_names,
        &config.locale_overrides,
    )
    .map_err(|e| e.to_string())?;

    emit(&report, json, |report| {
        let strings: usize = report.updated.iter().map(|file| file.names.len()).sum();
        println!(
            "Merged {} languages: {} strings updated in {} files",
            report.languages.len(),
            strings,
            report.updated.len()
        );
        if !report.untranslated.is_empty() {
            println!("Not translated: {}", report.untranslated.join(", "));
        }
    })
}
