//! OxiM Core - Signatures, Clauses, and Configuration for the Finite Model Finder
//!
//! This crate provides the foundational types shared by the OxiM crates:
//! - Propositional literals with a packed [`Lit`]/[`Var`] representation
//! - A first-order [`SymbolTable`] with per-argument sort bounds
//! - The flattened clause model ([`FoClause`], [`FoLiteral`]) consumed by the
//!   grounding machinery
//! - The error taxonomy and crate-wide [`Result`] alias
//! - Search configuration and resource-limit tracking
//!
//! # Examples
//!
//! ## Declaring a signature
//!
//! ```
//! use oxim_core::symbol::SymbolTable;
//!
//! let mut symbols = SymbolTable::new();
//! let p = symbols.add_predicate("p", 1);
//! let a = symbols.add_function("a", 0);
//!
//! assert_eq!(symbols.predicate(p).arity, 1);
//! assert!(symbols.function(a).is_constant());
//! ```
//!
//! ## Building clauses
//!
//! ```
//! use oxim_core::clause::{FoClause, FoLiteral};
//!
//! // p(X) | X = Y  over two clause variables
//! let clause = FoClause::new(vec![
//!     FoLiteral::pred(oxim_core::symbol::PredId(0), true, [0]),
//!     FoLiteral::var_eq(true, 0, 1),
//! ]);
//! assert_eq!(clause.var_count(), 2);
//! assert!(!clause.is_ground());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clause;
pub mod config;
pub mod error;
pub mod literal;
pub mod resource;
pub mod symbol;

pub use clause::{FoClause, FoLiteral, Problem};
pub use config::{FinderConfig, ResourceLimits, SatBackendKind};
pub use error::{OximError, Result};
pub use literal::{Lit, Var, MAX_VAR};
pub use resource::{LimitStatus, ResourceManager};
pub use symbol::{FuncId, FunctionInfo, PredId, PredicateInfo, Relation, SymbolTable};
