//! OxiM SAT - DPLL Solver
//!
//! A compact, dependency-light DPLL solver with unit propagation, a trail,
//! and chronological backtracking. It is the default backend behind the
//! finite-model search: each search round builds a fresh solver, loads the
//! round's clause set, and asks for a single verdict, so clause learning and
//! restarts buy little here and are deliberately absent.
//!
//! # Examples
//!
//! ```
//! use oxim_sat::{Lit, Solver, SolverResult};
//!
//! let mut solver = Solver::new();
//! solver.ensure_num_vars(2);
//! solver.add_clause([Lit::pos(1), Lit::pos(2)]);
//! solver.add_clause([Lit::neg(1)]);
//!
//! assert_eq!(solver.solve(), SolverResult::Sat);
//! assert!(solver.is_true(Lit::pos(2)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use oxim_core::literal::{Lit, Var, MAX_VAR};

mod solver;

pub use solver::{LBool, Solver, SolverConfig, SolverResult, SolverStats};
