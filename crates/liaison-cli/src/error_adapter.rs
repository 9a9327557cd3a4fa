//! Error adapter for converting LiaisonError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every
//! [`LiaisonError`] variant maps to a stable diagnostic code, and load
//! failures carry a hint about the expected document shape.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use liaison::{LiaisonError, loader::LoadError};

/// Adapter rendering a [`LiaisonError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a LiaisonError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LiaisonError::Io(_) => "liaison::io",
            LiaisonError::Load(_) => "liaison::load",
            LiaisonError::Config(_) => "liaison::config",
            LiaisonError::Session(_) => "liaison::session",
            LiaisonError::Export(_) => "liaison::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LiaisonError::Load(LoadError::Parse(_)) => {
                "expected a JSON object with `nodes` ({id, label, group}) and `links` ({source, target, relation}) arrays"
            }
            LiaisonError::Load(LoadError::BlankId { .. }) => "every entity needs a non-empty `id`",
            LiaisonError::Load(LoadError::DuplicateId { .. }) => "entity ids must be unique",
            LiaisonError::Session(_) => {
                "expected `{\"events\": [{\"at_ms\": 0, \"event\": {\"type\": \"pointer_down\", ...}}]}`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_per_variant() {
        let err = LiaisonError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "liaison::config");
        assert_eq!(adapter.to_string(), "Configuration error: bad");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_load_error_has_help() {
        let err = LiaisonError::from(LoadError::DuplicateId {
            id: "甲".to_string(),
        });
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "liaison::load");
        assert_eq!(adapter.help().unwrap().to_string(), "entity ids must be unique");
        assert_eq!(adapter.to_string(), "duplicate entity id `甲`");
    }
}
