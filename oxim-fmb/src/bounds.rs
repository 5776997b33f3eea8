//! Setup-Time Bound Computation.
//!
//! Two bounds are derived once, before the first round, and are read-only
//! afterwards: the per-clause variable bounds that prune instantiation, and
//! the maximum model size whose attainment turns an unsatisfiable round
//! into a refutation of finite satisfiability.

use oxim_core::clause::{FoClause, FoLiteral, Problem};
use oxim_core::symbol::{SymbolTable, UNBOUNDED};
use tracing::debug;

/// Per-variable instantiation bounds of one open clause.
///
/// A variable inherits the sort bound of the positions it is used at
/// (function argument, function value, predicate argument). Variables used
/// only in variable equalities carry no sort information and fall back to
/// the full domain.
#[must_use]
pub fn clause_variable_bounds(clause: &FoClause, symbols: &SymbolTable) -> Vec<u32> {
    let mut bounds = vec![UNBOUNDED; clause.var_count() as usize];

    let mut narrow = |var: u32, bound: u32| {
        let slot = &mut bounds[var as usize];
        debug_assert!(
            *slot == UNBOUNDED || bound == UNBOUNDED || *slot == bound,
            "variable {var} used at two different sort bounds"
        );
        *slot = (*slot).min(bound);
    };

    for lit in &clause.literals {
        match lit {
            FoLiteral::VarEq { .. } => {}
            FoLiteral::FuncEq {
                func, args, value, ..
            } => {
                let info = symbols.function(*func);
                narrow(*value, info.return_bound);
                for (j, &arg) in args.iter().enumerate() {
                    narrow(arg, info.arg_bounds[j]);
                }
            }
            FoLiteral::Pred { pred, args, .. } => {
                let info = symbols.predicate(*pred);
                for (j, &arg) in args.iter().enumerate() {
                    narrow(arg, info.arg_bounds[j]);
                }
            }
        }
    }

    bounds
}

/// The largest domain size worth searching, when one is known.
///
/// Two sources:
/// - an open clause that is a pure positive disjunction of two-variable
///   equalities is falsified by any assignment of pairwise distinct values,
///   so its variable count caps every satisfying domain;
/// - a function-free problem with `k` constants has a Herbrand model over
///   those constants whenever it has any model, so `max(k, 1)` caps the
///   search.
///
/// Reaching the cap with an unsatisfiable round is a genuine refutation,
/// not a resource limit.
#[must_use]
pub fn max_model_size(problem: &Problem) -> Option<u32> {
    let mut bound: Option<u32> = None;
    let mut narrow = |candidate: u32| {
        bound = Some(bound.map_or(candidate, |b| b.min(candidate)));
    };

    for clause in &problem.open_clauses {
        if clause.is_pure_positive_var_eqs() {
            narrow(clause.var_count());
        }
    }

    if problem.symbols.is_epr() {
        narrow((problem.symbols.constant_count() as u32).max(1));
    }

    if let Some(b) = bound {
        debug!(max_model_size = b, "detected maximum model size");
    }
    bound
}
