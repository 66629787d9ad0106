//! Module loader contract for dependencies that are not registered yet.
//!
//! The core never waits on a loader. A request is fire-and-forget: whatever
//! the loader fetches must register itself, and the caller retries the
//! controller registration afterwards. A module that cannot be fetched yet is
//! tolerated; a module that was fetched and broke is reported.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Loader failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The module source could not be fetched.
    Unavailable(String),
    /// The module was fetched but failed while evaluating.
    Failed { module: String, message: String },
}

impl LoadError {
    /// True for failures that only mean "not available yet".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(module) => write!(f, "module is unavailable: {module}"),
            Self::Failed { module, message } => {
                write!(f, "module {module} failed to load: {message}")
            }
        }
    }
}

impl Error for LoadError {}

/// Asynchronous module resolution facility.
pub trait ModuleLoader {
    /// Starts fetching `modules`. Returning `Ok` does not mean they are loaded.
    fn request(&self, modules: &[String]) -> Result<(), LoadError>;
}

#[cfg(test)]
mod tests {
    use super::LoadError;

    #[test]
    fn only_fetch_failures_count_as_unavailable() {
        assert!(LoadError::Unavailable("myModel".to_string()).is_unavailable());
        let failed = LoadError::Failed {
            module: "myModel".to_string(),
            message: "SyntaxError".to_string(),
        };
        assert!(!failed.is_unavailable());
        assert_eq!(failed.to_string(), "module myModel failed to load: SyntaxError");
    }
}
