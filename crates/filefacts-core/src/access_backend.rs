use std::fmt::{Display, Formatter, Result as FmtResult};

/// File access backend types
///
/// Which provider resolves file locators for this process. Chosen once at startup
/// and never changed while the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessBackend {
    Local,
    Remote,
}

impl Display for AccessBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AccessBackend::Local => write!(f, "local"),
            AccessBackend::Remote => write!(f, "remote"),
        }
    }
}
