//! Delete one named string from every resource file in a tree.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{document::ResourceDocument, error::Error, walk::find_resource_files};

#[derive(Debug, Default, Serialize)]
pub struct RemoveReport {
    pub name: String,
    pub files_scanned: usize,
    pub files_changed: Vec<PathBuf>,
}

/// Remove every `<string>` entry called `name` from `doc`.
///
/// Returns `true` if anything was removed.
pub fn remove_string(doc: &mut ResourceDocument, name: &str) -> bool {
    !doc.remove_where(|entry| entry.name() == name).is_empty()
}

/// Remove the entry `name` from every `file_name` file beneath `root`,
/// rewriting the files that contained it.
pub fn remove_string_from_tree(
    root: &Path,
    file_name: &str,
    name: &str,
) -> Result<RemoveReport, Error> {
    let mut report = RemoveReport {
        name: name.to_string(),
        ..Default::default()
    };

    for path in find_resource_files(root, file_name)? {
        report.files_scanned += 1;
        let mut doc = ResourceDocument::read_from(&path)?;
        if remove_string(&mut doc, name) {
            doc.write_to(&path)?;
            info!("removed `{}` from {}", name, path.display());
            report.files_changed.push(path);
        }
    }
    Ok(report)
}
