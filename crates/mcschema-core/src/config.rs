//! Validation run configuration

use crate::error::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Default bound on nested reference resolution
pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 64;

/// Options for a validation or default-synthesis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Stop after the first error instead of collecting all of them
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
    /// Maximum number of references resolved inside one another
    pub max_reference_depth: usize,
    /// Accept undeclared object fields everywhere
    pub permissive: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
            max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH,
            permissive: false,
        }
    }
}

impl ValidationConfig {
    /// Collect every error and reject undeclared fields
    pub fn strict() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_max_reference_depth(mut self, depth: usize) -> Self {
        self.max_reference_depth = depth;
        self
    }

    /// Accept undeclared object fields
    pub fn permissive(mut self) -> Self {
        self.permissive = true;
        self
    }

    /// An empty error collection honoring `fail_fast` and `max_errors`
    pub fn error_sink(&self) -> ValidationErrors {
        if self.fail_fast {
            ValidationErrors::with_limit(1)
        } else if self.max_errors > 0 {
            ValidationErrors::with_limit(self.max_errors)
        } else {
            ValidationErrors::new()
        }
    }
}
