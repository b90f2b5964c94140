//! Health domain model.

use serde::{Deserialize, Serialize};

/// Structured diagnostics reported by a backend.
///
/// Configuration problems and unreachable dependencies are surfaced here as
/// data instead of failing the whole process, so the API layer can return a
/// degraded-service response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Health {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }

    /// Combines the diagnostics of two backends into one report.
    pub fn merge(mut self, other: Health) -> Health {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_concatenates_errors_and_warnings() {
        let a = Health {
            errors: vec!["db down".to_string()],
            warnings: vec![],
        };
        let b = Health {
            errors: vec!["secret missing".to_string()],
            warnings: vec!["slow provider".to_string()],
        };

        let merged = a.merge(b);
        assert_eq!(merged.errors, vec!["db down", "secret missing"]);
        assert_eq!(merged.warnings, vec!["slow provider"]);
        assert!(!merged.is_healthy());
    }

    #[test]
    fn empty_report_is_healthy() {
        assert!(Health::ok().is_healthy());
    }
}
