//! OxiM FMB - Finite-Domain Model Finding over a SAT Backend
//!
//! Decides finite satisfiability of a flattened first-order clause set by
//! encoding "does a model of size `n` exist?" propositionally and growing
//! `n` until a model appears, a maximum model size is exhausted (a genuine
//! refutation), or resources run out.
//!
//! The moving parts, leaves first:
//! - [`SymbolSpace`]: per-domain-size variable layout with overflow checks
//! - [`GroundingCodec`]: (symbol, tuple, polarity) -> SAT literal
//! - [`Odometer`]: the one tuple enumerator everything else drives
//! - [`ClauseInstantiator`]: ground pass-through and open-clause grounding
//! - [`AxiomGenerator`]: functionality, totality, symmetry breaking
//! - [`FiniteModelFinder`]: the per-size round loop
//! - [`Interpretation`]: the extracted model
//!
//! # Examples
//!
//! ```
//! use oxim_core::clause::{FoClause, FoLiteral, Problem};
//! use oxim_core::config::FinderConfig;
//! use oxim_core::symbol::SymbolTable;
//! use oxim_fmb::FiniteModelFinder;
//!
//! // One open clause p(X): satisfied by a one-element model with p true.
//! let mut symbols = SymbolTable::new();
//! let p = symbols.add_predicate("p", 1);
//! let clause = FoClause::new(vec![FoLiteral::pred(p, true, [0])]);
//! let problem = Problem::new(symbols, vec![clause]);
//!
//! let mut finder = FiniteModelFinder::new(problem, FinderConfig::default());
//! let result = finder.run();
//! assert!(result.is_satisfiable());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod axioms;
pub mod backend;
pub mod bounds;
pub mod codec;
pub mod instantiate;
pub mod model;
pub mod odometer;
pub mod search;
pub mod space;

pub use axioms::{AxiomGenerator, SymmetryLedger};
pub use backend::{create_backend, SatBackend, SatVerdict};
pub use codec::GroundingCodec;
pub use instantiate::{ClauseInstantiator, ClauseQueue};
pub use model::{FunctionRow, FunctionTable, Interpretation, PredicateRow, PredicateTable};
pub use odometer::Odometer;
pub use search::{FinderResult, FiniteModelFinder, GiveUpReason, SearchStats};
pub use space::SymbolSpace;
