//! Import statement fixers

mod no_leading_import_slash;

pub use no_leading_import_slash::NoLeadingImportSlashFixer;
