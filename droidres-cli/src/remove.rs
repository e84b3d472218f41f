use std::path::PathBuf;

use droidres::{Config, remove_string_from_tree};

use crate::output::emit;

/// Run the remove-string command: delete `name` from every resource file.
pub fn run_remove_string_command(
    config: &Config,
    name: &str,
    res_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let root = res_dir.unwrap_or_else(|| config.resources_dir.clone());
    let report =
        remove_string_from_tree(&root, &config.file_name, name).map_err(|e| e.to_string())?;

    emit(&report, json, |report| {
        println!(
            "Removed `{}` from {} of {} files",
            report.name,
            report.files_changed.len(),
            report.files_scanned
        );
    })
}
