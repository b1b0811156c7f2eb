//! Engine settings.
//!
//! Settings come from the command line. Roots default to the current
//! directory, so relative template paths and output paths behave as if
//! conjure ran where it was invoked.

use crate::chain::DEFAULT_MAX_INHERIT_DEPTH;
use crate::document::DocumentFormat;
use crate::error::{ConjureError, Result};
use std::path::{Path, PathBuf};

/// Settings for one conjure run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Format of every document in the chain, and of rendered mapping values.
    pub format: DocumentFormat,

    /// Maximum number of documents in an inheritance chain, root included.
    pub max_inherit_depth: usize,

    /// Directory against which relative template paths are read.
    pub template_root: PathBuf,

    /// Directory against which relative output paths are written.
    pub output_root: PathBuf,

    /// Resolve everything but write nothing.
    pub dry_run: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            format: DocumentFormat::default(),
            max_inherit_depth: DEFAULT_MAX_INHERIT_DEPTH,
            template_root: PathBuf::from("."),
            output_root: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl EngineSettings {
    /// Settings for the document at `source`, with the format inferred from
    /// its extension unless `format` names one.
    pub fn for_source<P: AsRef<Path>>(source: P, format: Option<&str>) -> Result<Self> {
        let format = match format {
            Some(name) => DocumentFormat::from_str(name).ok_or_else(|| {
                ConjureError::UserError(format!(
                    "unknown format '{}': expected yaml, json or toml",
                    name
                ))
            })?,
            None => DocumentFormat::from_path(source),
        };

        Ok(Self {
            format,
            ..Self::default()
        })
    }

    /// Validate setting values.
    ///
    /// Validation rules:
    /// - `max_inherit_depth` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        if self.max_inherit_depth == 0 {
            return Err(ConjureError::UserError(
                "max inherit depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.format, DocumentFormat::Yaml);
        assert_eq!(settings.max_inherit_depth, DEFAULT_MAX_INHERIT_DEPTH);
        assert_eq!(settings.template_root, PathBuf::from("."));
        assert_eq!(settings.output_root, PathBuf::from("."));
        assert!(!settings.dry_run);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_format_inferred_from_source() {
        let settings = EngineSettings::for_source("conf/conjure.toml", None).unwrap();
        assert_eq!(settings.format, DocumentFormat::Toml);
    }

    #[test]
    fn test_explicit_format_wins() {
        let settings = EngineSettings::for_source("conjure.toml", Some("json")).unwrap();
        assert_eq!(settings.format, DocumentFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_user_error() {
        let err = EngineSettings::for_source("conjure.yml", Some("xml")).unwrap_err();
        assert!(matches!(err, ConjureError::UserError(_)));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let settings = EngineSettings {
            max_inherit_depth: 0,
            ..EngineSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
