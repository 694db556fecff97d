use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Information,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Information => write!(f, "info"),
        }
    }
}

/// A finding about one method's return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    /// Dotted path of the method.
    pub method: String,
    /// The type name as written.
    pub reference: String,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn unresolved(path: PathBuf, method: String, reference: &str) -> Self {
        Self {
            path,
            method,
            reference: reference.to_string(),
            severity: Severity::Warning,
            message: format!("cannot resolve type '{}'", reference),
        }
    }

    pub fn dependency(path: PathBuf, method: String, reference: &str, canonical: &str) -> Self {
        Self {
            path,
            method,
            reference: reference.to_string(),
            severity: Severity::Information,
            message: format!("type '{}' is taken from unindexed import '{}'", reference, canonical),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]: {}",
            self.path.display(),
            self.severity,
            self.method,
            self.message
        )
    }
}
