#![forbid(unsafe_code)]
//! Maintenance toolkit for Android `strings.xml` translation files.
//!
//! Each tool is a one-shot pass over a resource tree:
//!
//! - [`remove::remove_string_from_tree`] deletes a named string everywhere.
//! - [`merge::merge_translations`] pulls crowd-sourced translations into the app.
//! - [`prune::remove_english_duplicates`] drops translations equal to English.
//! - [`layout::render_layout`] renders a keyboard layout XML fragment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use droidres::{Config, merge_translations};
//!
//! let config = Config::load(None)?;
//! let report = merge_translations(
//!     &config.crowd_dir,
//!     &config.resources_dir,
//!     &config.file_name,
//!     &config.protected_names,
//!     &config.locale_overrides,
//! )?;
//! println!("{} files updated", report.updated.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Files are edited losslessly: anything a tool does not change is written
//! back exactly as it was read, in the file's original encoding.

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod locale;
pub mod merge;
pub mod prune;
pub mod remove;
pub mod walk;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, ProtectedNames},
    document::{LanguageTable, ResourceDocument, StringEntry},
    error::Error,
    layout::{BuiltinLayout, KeyboardLayout, SymbolTable, render_layout},
    locale::{LocaleOverrides, values_dir_for_locale},
    merge::{MergeReport, merge_document, merge_translations},
    prune::{PruneReport, prune_document, remove_english_duplicates},
    remove::{RemoveReport, remove_string, remove_string_from_tree},
};
