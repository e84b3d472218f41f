//! Bridging between crowd-platform locale tags and Android resource directories.
//!
//! Translation platforms export one directory per locale named with a
//! hyphenated tag (`pt-BR`), while Android expects `values-pt-rBR`. Android
//! also still uses a few legacy ISO 639 codes (`in` for Indonesian, `iw` for
//! Hebrew), handled through [`LocaleOverrides`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Language-subtag substitutions applied before building a directory name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocaleOverrides(BTreeMap<String, String>);

impl Default for LocaleOverrides {
    fn default() -> Self {
        [("id", "in"), ("he", "iw")].into_iter().collect()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for LocaleOverrides {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        LocaleOverrides(
            iter.into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        )
    }
}

impl LocaleOverrides {
    /// The code Android uses for `language`.
    pub fn resolve<'a>(&'a self, language: &'a str) -> &'a str {
        self.0.get(language).map(String::as_str).unwrap_or(language)
    }
}

/// Translate a locale tag such as `pt-BR` into an Android resource directory
/// name such as `values-pt-rBR`.
///
/// Tags with a script or variant subtag use the BCP 47 qualifier form
/// (`sr-Latn` → `values-b+sr+Latn`).
pub fn values_dir_for_locale(tag: &str, overrides: &LocaleOverrides) -> Result<String, Error> {
    let id: LanguageIdentifier = tag
        .parse()
        .map_err(|_| Error::InvalidLocale(tag.to_string()))?;
    let language = overrides.resolve(id.language.as_str());

    if id.script.is_none() && id.variants().len() == 0 {
        return Ok(match &id.region {
            Some(region) => format!("values-{}-r{}", language, region.as_str()),
            None => format!("values-{}", language),
        });
    }

    let mut parts = vec![language.to_string()];
    if let Some(script) = &id.script {
        parts.push(script.as_str().to_string());
    }
    if let Some(region) = &id.region {
        parts.push(region.as_str().to_string());
    }
    parts.extend(id.variants().map(|variant| variant.as_str().to_string()));
    Ok(format!("values-b+{}", parts.join("+")))
}
