//! Error Taxonomy.
//!
//! Only genuinely fatal or caller-recoverable conditions are errors. Time
//! expiry and search give-up are reported as outcomes by the search layer;
//! upstream contract breaches (malformed clauses, out-of-range tuples) abort
//! via assertions so they can never silently mis-encode.

use thiserror::Error;

/// Errors produced by the OxiM crates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OximError {
    /// An unknown SAT backend was requested through configuration.
    #[error("unknown SAT backend `{0}`")]
    UnknownBackend(String),

    /// The propositional address space for the requested domain size does
    /// not fit into the representable variable range.
    ///
    /// Recoverable at the search level: the search reports an unknown
    /// verdict instead of growing the domain further.
    #[error(
        "address space overflow at domain size {domain_size}: \
         symbol `{symbol}` needs more than {ceiling} variables"
    )]
    AddressOverflow {
        /// The domain size whose encoding overflowed.
        domain_size: u32,
        /// The symbol whose block did not fit.
        symbol: String,
        /// The representable variable ceiling.
        ceiling: u32,
    },
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, OximError>;
