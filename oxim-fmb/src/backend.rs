//! SAT Backend Contract.
//!
//! The search drives its backend through a narrow trait; which solver sits
//! behind it is configuration, not search logic. Each round constructs a
//! fresh backend, so nothing here is incremental.

use oxim_core::config::SatBackendKind;
use oxim_core::literal::Lit;

/// Verdict of one backend `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatVerdict {
    /// A satisfying assignment exists and can be queried.
    Sat,
    /// No satisfying assignment exists.
    Unsat,
    /// The backend gave up.
    Unknown,
}

/// The contract a SAT solver must meet to serve the search.
pub trait SatBackend {
    /// Declare that variables `1..=count` will be used.
    fn ensure_num_vars(&mut self, count: u32);

    /// Load one clause.
    fn add_clause(&mut self, lits: &[Lit]);

    /// Load a batch of clauses.
    fn add_clauses(&mut self, clauses: &[Vec<Lit>]) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }

    /// Decide the loaded clause set.
    fn solve(&mut self) -> SatVerdict;

    /// Whether `lit` holds in the satisfying assignment. Only meaningful
    /// after [`SatBackend::solve`] returned [`SatVerdict::Sat`].
    fn is_true(&self, lit: Lit) -> bool;
}

impl SatBackend for oxim_sat::Solver {
    fn ensure_num_vars(&mut self, count: u32) {
        oxim_sat::Solver::ensure_num_vars(self, count);
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        oxim_sat::Solver::add_clause(self, lits.iter().copied());
    }

    fn solve(&mut self) -> SatVerdict {
        match oxim_sat::Solver::solve(self) {
            oxim_sat::SolverResult::Sat => SatVerdict::Sat,
            oxim_sat::SolverResult::Unsat => SatVerdict::Unsat,
            oxim_sat::SolverResult::Unknown => SatVerdict::Unknown,
        }
    }

    fn is_true(&self, lit: Lit) -> bool {
        oxim_sat::Solver::is_true(self, lit)
    }
}

/// Instantiate the configured backend.
pub fn create_backend(kind: SatBackendKind) -> Box<dyn SatBackend> {
    match kind {
        SatBackendKind::Dpll => Box::new(oxim_sat::Solver::new()),
    }
}
