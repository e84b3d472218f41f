//! Remove translations that are identical to the English baseline.
//!
//! A translated entry whose value equals the baseline value adds nothing:
//! Android falls back to `values/strings.xml` anyway. Dropping it keeps the
//! translation files honest about what is actually translated.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    document::{LanguageTable, ResourceDocument},
    error::Error,
    walk::{find_resource_files, language_dir},
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    pub removed: Vec<String>,
    /// Names present in the document but unknown to the baseline; left in place.
    pub missing_from_baseline: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrunedFile {
    pub path: PathBuf,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingKey {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Default, Serialize)]
pub struct PruneReport {
    pub baseline: PathBuf,
    pub files_scanned: usize,
    pub pruned: Vec<PrunedFile>,
    pub missing_from_baseline: Vec<MissingKey>,
}

/// Drop every entry of `doc` whose value equals the baseline's value for the
/// same name.
pub fn prune_document(doc: &mut ResourceDocument, baseline: &LanguageTable) -> PruneOutcome {
    let missing_from_baseline = doc
        .entries()
        .filter(|entry| !baseline.contains(entry.name()))
        .map(|entry| entry.name().to_string())
        .collect();
    let removed = doc.remove_where(|entry| baseline.get(entry.name()) == Some(entry.value()));
    PruneOutcome {
        removed,
        missing_from_baseline,
    }
}

/// Prune every translated `file_name` under `resources_dir` against
/// `resources_dir/<baseline_dir>/<file_name>`.
pub fn remove_english_duplicates(
    resources_dir: &Path,
    baseline_dir: &str,
    file_name: &str,
) -> Result<PruneReport, Error> {
    let baseline_path = resources_dir.join(baseline_dir).join(file_name);
    let baseline_doc = ResourceDocument::read_from(&baseline_path)?;
    let baseline = LanguageTable::from(&baseline_doc);

    let mut report = PruneReport {
        baseline: baseline_path,
        ..Default::default()
    };

    for path in find_resource_files(resources_dir, file_name)? {
        if language_dir(&path) == Some(baseline_dir) {
            continue;
        }
        report.files_scanned += 1;
        info!("process {}", path.display());

        let mut doc = ResourceDocument::read_from(&path)?;
        let outcome = prune_document(&mut doc, &baseline);

        for name in outcome.missing_from_baseline {
            warn!("`{}` in {} is not in the baseline", name, path.display());
            report.missing_from_baseline.push(MissingKey {
                path: path.clone(),
                name,
            });
        }
        if !outcome.removed.is_empty() {
            doc.write_to(&path)?;
            report.pruned.push(PrunedFile {
                path,
                removed: outcome.removed,
            });
        }
    }
    Ok(report)
}
