//! Resource tree traversal.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::Error;

/// Find every file called `file_name` beneath `root`, sorted by path.
///
/// Traversal is sequential and does not honour `.gitignore`; resource trees
/// are walked in full. A missing or unreadable directory is an error.
pub fn find_resource_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>, Error> {
    let set = file_name_matcher(file_name)?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut found = Vec::new();
    for dent in walker {
        let dent = dent.map_err(|e| Error::Walk(e).at(root))?;
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if set.is_match(dent.path()) {
            debug!("found {}", dent.path().display());
            found.push(dent.into_path());
        }
    }
    Ok(found)
}

/// Name of the directory a resource file lives in (`values-fr` for
/// `res/values-fr/strings.xml`).
pub fn language_dir(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}

fn file_name_matcher(file_name: &str) -> Result<GlobSet, Error> {
    // literal_separator keeps `*` in the file name from matching across directories
    let glob = GlobBuilder::new(&format!("**/{}", file_name))
        .literal_separator(true)
        .build()?;
    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    Ok(builder.build()?)
}
