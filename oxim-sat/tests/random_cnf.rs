//! Randomized cross-checks of the DPLL solver against exhaustive
//! evaluation over small variable counts.

use oxim_sat::{Lit, Solver, SolverResult};
use proptest::prelude::*;

const NUM_VARS: u32 = 4;

fn brute_force_sat(clauses: &[Vec<Lit>]) -> bool {
    (0u32..(1 << NUM_VARS)).any(|mask| {
        clauses.iter().all(|clause| {
            clause.iter().any(|lit| {
                let bit = mask & (1 << (lit.var() - 1)) != 0;
                bit == lit.is_positive()
            })
        })
    })
}

fn clause_strategy() -> impl Strategy<Value = Vec<Lit>> {
    prop::collection::vec((1..=NUM_VARS, prop::bool::ANY), 1..4)
        .prop_map(|lits| lits.into_iter().map(|(v, pos)| Lit::new(v, pos)).collect())
}

proptest! {
    #[test]
    fn verdict_agrees_with_exhaustive_evaluation(
        clauses in prop::collection::vec(clause_strategy(), 0..8)
    ) {
        let mut solver = Solver::new();
        solver.ensure_num_vars(NUM_VARS);
        for clause in &clauses {
            solver.add_clause(clause.iter().copied());
        }
        let expected = if brute_force_sat(&clauses) {
            SolverResult::Sat
        } else {
            SolverResult::Unsat
        };
        prop_assert_eq!(solver.solve(), expected);
    }

    #[test]
    fn reported_model_satisfies_every_clause(
        clauses in prop::collection::vec(clause_strategy(), 0..8)
    ) {
        let mut solver = Solver::new();
        solver.ensure_num_vars(NUM_VARS);
        for clause in &clauses {
            solver.add_clause(clause.iter().copied());
        }
        if solver.solve() == SolverResult::Sat {
            for clause in &clauses {
                prop_assert!(
                    clause.iter().any(|&lit| solver.is_true(lit)),
                    "clause {:?} unsatisfied", clause
                );
            }
        }
    }
}
