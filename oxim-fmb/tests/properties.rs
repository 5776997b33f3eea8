//! Property checks for the encoding layers: codec injectivity and the
//! semantics of the generated structural axioms under exhaustive small
//! assignments.

use oxim_core::literal::Lit;
use oxim_core::symbol::{Relation, SymbolTable};
use oxim_fmb::{AxiomGenerator, ClauseQueue, GroundingCodec, Odometer, SymbolSpace};
use proptest::prelude::*;
use std::collections::HashSet;

/// Every grounding of every relation in the signature, via the shared
/// odometer.
fn all_groundings(symbols: &SymbolTable, n: u32) -> Vec<(Relation, Vec<u32>)> {
    let mut out = Vec::new();
    let mut push_all = |relation: Relation| {
        let dims = symbols.dimensions(relation);
        let mut odo = Odometer::new(vec![n; dims as usize]);
        while odo.advance() {
            out.push((relation, odo.digits().to_vec()));
        }
    };
    for p in symbols.predicate_ids() {
        push_all(Relation::Predicate(p));
    }
    for f in symbols.function_ids() {
        push_all(Relation::Function(f));
    }
    out
}

proptest! {
    /// Distinct (symbol, tuple) pairs never collide at a fixed domain size.
    #[test]
    fn codec_is_injective(
        pred_arities in prop::collection::vec(0u32..3, 0..3),
        func_arities in prop::collection::vec(0u32..3, 0..3),
        n in 1u32..4,
    ) {
        let mut symbols = SymbolTable::new();
        for (i, &a) in pred_arities.iter().enumerate() {
            symbols.add_predicate(&format!("p{i}"), a);
        }
        for (i, &a) in func_arities.iter().enumerate() {
            symbols.add_function(&format!("f{i}"), a);
        }

        let space = SymbolSpace::allocate(&symbols, n).unwrap();
        let codec = GroundingCodec::new(&symbols, &space);

        let mut seen = HashSet::new();
        for (relation, tuple) in all_groundings(&symbols, n) {
            let var = codec.encode(relation, &tuple, true).var();
            prop_assert!(var >= 1);
            prop_assert!(var <= space.var_count());
            prop_assert!(
                seen.insert(var),
                "collision for {:?} {:?} at n={}", relation, tuple, n
            );
        }
    }

    /// The odometer visits exactly the product of its bounds.
    #[test]
    fn odometer_visits_the_full_product(maxes in prop::collection::vec(1u32..5, 1..4)) {
        let expected: u64 = maxes.iter().map(|&m| u64::from(m)).product();
        let mut odo = Odometer::new(maxes.clone());
        let mut seen = HashSet::new();
        while odo.advance() {
            let tuple = odo.digits().to_vec();
            for (digit, max) in tuple.iter().zip(&maxes) {
                prop_assert!(*digit >= 1 && digit <= max);
            }
            prop_assert!(seen.insert(tuple), "tuple visited twice");
        }
        prop_assert_eq!(seen.len() as u64, expected);
    }
}

/// Evaluate a clause under an assignment given as the set of true variables.
fn clause_satisfied(clause: &[Lit], true_vars: &HashSet<u32>) -> bool {
    clause
        .iter()
        .any(|lit| true_vars.contains(&lit.var()) == lit.is_positive())
}

/// Walk every subset of `vars` as the set of true variables.
fn for_each_assignment(vars: &[u32], mut visit: impl FnMut(&HashSet<u32>)) {
    let m = vars.len();
    assert!(m < 20, "assignment space too large to enumerate");
    for mask in 0u32..(1 << m) {
        let true_vars: HashSet<u32> = vars
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &v)| v)
            .collect();
        visit(&true_vars);
    }
}

/// Any assignment satisfying the functionality clauses makes at most one
/// output true per input tuple.
#[test]
fn functionality_clauses_enforce_at_most_one_output() {
    let n = 2u32;
    let mut symbols = SymbolTable::new();
    let f = symbols.add_function("f", 1);
    let space = SymbolSpace::allocate(&symbols, n).unwrap();
    let codec = GroundingCodec::new(&symbols, &space);

    let mut queue = ClauseQueue::new();
    AxiomGenerator::new().functionality(&codec, &mut queue);

    // the four groundings f(x) = y with x, y in {1, 2}
    let var_of = |x: u32, y: u32| codec.encode(Relation::Function(f), &[x, y], true).var();
    let vars: Vec<u32> = vec![var_of(1, 1), var_of(1, 2), var_of(2, 1), var_of(2, 2)];

    for_each_assignment(&vars, |true_vars| {
        let satisfied = queue
            .clauses()
            .iter()
            .all(|c| clause_satisfied(c, true_vars));
        if satisfied {
            for x in 1..=n {
                let outputs = (1..=n).filter(|&y| true_vars.contains(&var_of(x, y))).count();
                assert!(outputs <= 1, "two outputs for input {x}");
            }
        }
    });
}

/// Any assignment satisfying the totality clauses makes at least one output
/// true per input tuple.
#[test]
fn totality_clauses_enforce_at_least_one_output() {
    let n = 2u32;
    let mut symbols = SymbolTable::new();
    let f = symbols.add_function("f", 1);
    let space = SymbolSpace::allocate(&symbols, n).unwrap();
    let codec = GroundingCodec::new(&symbols, &space);

    let mut queue = ClauseQueue::new();
    AxiomGenerator::new().totality(&codec, &mut queue);

    let var_of = |x: u32, y: u32| codec.encode(Relation::Function(f), &[x, y], true).var();
    let vars: Vec<u32> = vec![var_of(1, 1), var_of(1, 2), var_of(2, 1), var_of(2, 2)];

    let mut saw_satisfying = false;
    for_each_assignment(&vars, |true_vars| {
        let satisfied = queue
            .clauses()
            .iter()
            .all(|c| clause_satisfied(c, true_vars));
        if satisfied {
            saw_satisfying = true;
            for x in 1..=n {
                let outputs = (1..=n).filter(|&y| true_vars.contains(&var_of(x, y))).count();
                assert!(outputs >= 1, "no output for input {x}");
            }
        }
    });
    assert!(saw_satisfying, "some assignment must satisfy totality");
}

/// Functionality and totality together pin exactly one output per input,
/// and every function table over the domain satisfies both.
#[test]
fn functionality_and_totality_characterize_function_tables() {
    let n = 2u32;
    let mut symbols = SymbolTable::new();
    let f = symbols.add_function("f", 1);
    let space = SymbolSpace::allocate(&symbols, n).unwrap();
    let codec = GroundingCodec::new(&symbols, &space);

    let mut queue = ClauseQueue::new();
    let mut gen = AxiomGenerator::new();
    gen.functionality(&codec, &mut queue);
    gen.totality(&codec, &mut queue);

    let var_of = |x: u32, y: u32| codec.encode(Relation::Function(f), &[x, y], true).var();
    let vars: Vec<u32> = vec![var_of(1, 1), var_of(1, 2), var_of(2, 1), var_of(2, 2)];

    let mut satisfying = 0u32;
    for_each_assignment(&vars, |true_vars| {
        if queue
            .clauses()
            .iter()
            .all(|c| clause_satisfied(c, true_vars))
        {
            satisfying += 1;
        }
    });
    // exactly the n^n = 4 graphs of functions {1,2} -> {1,2}
    assert_eq!(satisfying, 4);
}
