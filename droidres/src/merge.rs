//! Merge crowd-sourced translations into the app's resource tree.
//!
//! The crowd export has one directory per locale tag (`crowdin/pt-BR/strings.xml`);
//! each is loaded into a [`LanguageTable`] keyed by the matching Android
//! directory name (`values-pt-rBR`). Target files are then updated entry by
//! entry, except for protected names.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::ProtectedNames,
    document::{LanguageTable, ResourceDocument},
    error::Error,
    locale::{LocaleOverrides, values_dir_for_locale},
    walk::{find_resource_files, language_dir},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedFile {
    pub path: PathBuf,
    pub names: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct MergeReport {
    /// Target directory names that have a crowd-sourced table.
    pub languages: Vec<String>,
    pub updated: Vec<UpdatedFile>,
    /// Target directories with no crowd-sourced counterpart.
    pub untranslated: Vec<String>,
}

/// Apply `table` to `doc`, skipping protected names.
///
/// An entry is replaced only when the table has a non-empty value for it that
/// differs from the current one. Returns the names that changed.
pub fn merge_document(
    doc: &mut ResourceDocument,
    table: &LanguageTable,
    protected: &ProtectedNames,
) -> Vec<String> {
    let pending: Vec<(String, String)> = doc
        .entries()
        .filter(|entry| !protected.contains(entry.name()))
        .filter_map(|entry| {
            let crowd = table.get(entry.name())?;
            (!crowd.is_empty() && crowd != entry.value())
                .then(|| (entry.name().to_string(), crowd.to_string()))
        })
        .collect();

    let mut updated = Vec::with_capacity(pending.len());
    for (name, value) in pending {
        if doc.set_value(&name, &value) {
            updated.push(name);
        }
    }
    updated
}

/// Load one [`LanguageTable`] per crowd-sourced locale directory, keyed by the
/// Android resource directory it maps to.
pub fn load_crowd_tables(
    crowd_dir: &Path,
    file_name: &str,
    overrides: &LocaleOverrides,
) -> Result<BTreeMap<String, LanguageTable>, Error> {
    let mut tables = BTreeMap::new();
    for path in find_resource_files(crowd_dir, file_name)? {
        let Some(tag) = language_dir(&path) else {
            continue;
        };
        let dir = match values_dir_for_locale(tag, overrides) {
            Ok(dir) => dir,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let doc = ResourceDocument::read_from(&path)?;
        let table = LanguageTable::from(&doc);
        debug!("{} -> {} ({} strings)", tag, dir, table.len());
        tables.insert(dir, table);
    }
    Ok(tables)
}

/// Merge every crowd-sourced language under `crowd_dir` into the matching
/// files under `resources_dir`.
pub fn merge_translations(
    crowd_dir: &Path,
    resources_dir: &Path,
    file_name: &str,
    protected: &ProtectedNames,
    overrides: &LocaleOverrides,
) -> Result<MergeReport, Error> {
    let tables = load_crowd_tables(crowd_dir, file_name, overrides)?;
    let mut report = MergeReport {
        languages: tables.keys().cloned().collect(),
        ..Default::default()
    };
    info!("crowd-sourced languages: {}", report.languages.join(", "));

    for path in find_resource_files(resources_dir, file_name)? {
        let Some(lang) = language_dir(&path) else {
            continue;
        };
        let Some(table) = tables.get(lang) else {
            warn!("{} not translated", lang);
            report.untranslated.push(lang.to_string());
            continue;
        };

        let mut doc = ResourceDocument::read_from(&path)?;
        let names = merge_document(&mut doc, table, protected);
        if names.is_empty() {
            debug!("{} already up to date", path.display());
            continue;
        }
        doc.ensure_declaration();
        doc.write_to(&path)?;
        info!("write {} ({} updated)", path.display(), names.len());
        report.updated.push(UpdatedFile { path, names });
    }
    Ok(report)
}
