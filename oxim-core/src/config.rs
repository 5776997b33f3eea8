//! Finder Configuration.
//!
//! Backend selection is plain configuration: the search core never inspects
//! which solver it is driving beyond the backend contract. Unknown backend
//! names fail at parse time, before any search starts.

use crate::error::OximError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Which SAT backend the search should drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SatBackendKind {
    /// The in-tree DPLL solver from `oxim-sat`.
    #[default]
    Dpll,
}

impl FromStr for SatBackendKind {
    type Err = OximError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dpll" | "oxim" => Ok(Self::Dpll),
            other => Err(OximError::UnknownBackend(other.to_owned())),
        }
    }
}

/// Resource limits observed by the search.
///
/// The time limit is checked once per round boundary: a running SAT call is
/// never interrupted, only the next round is skipped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Wall-clock budget for the whole search.
    pub time_limit: Option<Duration>,
    /// Largest domain size to attempt before giving up.
    pub max_domain_size: Option<u32>,
}

/// Configuration of a finite-model search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderConfig {
    /// The SAT backend to drive.
    pub backend: SatBackendKind,
    /// Resource limits.
    pub limits: ResourceLimits,
    /// Whether to emit symmetry-breaking axioms. Disabling them never
    /// changes the verdict, only the search-space size.
    pub enable_symmetry_breaking: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            backend: SatBackendKind::default(),
            limits: ResourceLimits::default(),
            enable_symmetry_breaking: true,
        }
    }
}

impl FinderConfig {
    /// Default configuration: no limits, symmetry breaking on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wall-clock budget.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.limits.time_limit = Some(limit);
        self
    }

    /// Cap the domain size the search will attempt.
    #[must_use]
    pub fn with_max_domain_size(mut self, max: u32) -> Self {
        self.limits.max_domain_size = Some(max);
        self
    }

    /// Select the SAT backend by name.
    ///
    /// # Errors
    ///
    /// Returns [`OximError::UnknownBackend`] for unrecognized names.
    pub fn with_backend_name(mut self, name: &str) -> crate::error::Result<Self> {
        self.backend = name.parse()?;
        Ok(self)
    }

    /// Turn symmetry breaking off.
    #[must_use]
    pub fn without_symmetry_breaking(mut self) -> Self {
        self.enable_symmetry_breaking = false;
        self
    }
}
