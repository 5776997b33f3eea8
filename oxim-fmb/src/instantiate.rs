//! Clause Instantiation.
//!
//! Ground clauses pass straight through the codec once per round; open
//! clauses are grounded over every tuple the odometer produces for their
//! variable bounds. Equality literals between variables are decided against
//! the tuple on the spot: a satisfied equality makes the whole instance
//! vacuous, a falsified one just drops out of the instance.

use crate::codec::GroundingCodec;
use crate::odometer::Odometer;
use oxim_core::clause::{FoClause, FoLiteral, Problem};
use oxim_core::literal::Lit;
use oxim_core::symbol::Relation;
use smallvec::SmallVec;

/// Round-local sink for generated propositional clauses.
///
/// Every queued clause goes through duplicate-literal removal; tautologies
/// are dropped. An instance reduced to no literals at all is falsified by
/// every assignment of the current domain size, so it is recorded as a flag
/// instead of being emitted; the search reads the flag as an unsatisfiable
/// round without consulting the backend.
#[derive(Debug, Default)]
pub struct ClauseQueue {
    clauses: Vec<Vec<Lit>>,
    falsified_instance: bool,
}

impl ClauseQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one clause, consuming the caller's scratch buffer contents.
    pub fn push(&mut self, lits: &mut SmallVec<[Lit; 8]>) {
        if lits.is_empty() {
            self.falsified_instance = true;
            return;
        }
        lits.sort_unstable();
        lits.dedup();
        // Complementary literals sit adjacent after the sort.
        if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
            lits.clear();
            return;
        }
        self.clauses.push(lits.to_vec());
        lits.clear();
    }

    /// The queued clauses.
    #[must_use]
    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Number of queued clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the queue holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether some instance collapsed to the empty clause this round.
    #[must_use]
    pub fn saw_falsified_instance(&self) -> bool {
        self.falsified_instance
    }
}

/// Grounds clauses into a [`ClauseQueue`], reusing its scratch buffers
/// across instances.
#[derive(Debug, Default)]
pub struct ClauseInstantiator {
    scratch: SmallVec<[Lit; 8]>,
    grounding: SmallVec<[u32; 8]>,
}

impl ClauseInstantiator {
    /// A fresh instantiator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every ground clause once.
    ///
    /// # Panics
    ///
    /// Panics if a ground clause contains anything but zero-arity predicate
    /// literals; [`Problem::new`] establishes that shape.
    pub fn ground_pass(
        &mut self,
        problem: &Problem,
        codec: &GroundingCodec<'_>,
        queue: &mut ClauseQueue,
    ) {
        for clause in &problem.ground_clauses {
            self.scratch.clear();
            for lit in &clause.literals {
                match lit {
                    FoLiteral::Pred {
                        pred,
                        positive,
                        args,
                    } if args.is_empty() => {
                        self.scratch
                            .push(codec.encode(Relation::Predicate(*pred), &[], *positive));
                    }
                    other => panic!("non-propositional literal in ground clause: {other:?}"),
                }
            }
            queue.push(&mut self.scratch);
        }
    }

    /// Ground `clause` over every variable assignment admitted by `bounds`
    /// and the current domain size.
    pub fn instantiate(
        &mut self,
        clause: &FoClause,
        bounds: &[u32],
        codec: &GroundingCodec<'_>,
        queue: &mut ClauseQueue,
    ) {
        let n = codec.domain_size();
        debug_assert_eq!(bounds.len(), clause.var_count() as usize);
        let maxes: Vec<u32> = bounds.iter().map(|&b| b.min(n)).collect();

        let mut odo = Odometer::new(maxes);
        'instances: while odo.advance() {
            self.scratch.clear();
            let tuple = odo.digits();

            for lit in &clause.literals {
                match lit {
                    FoLiteral::VarEq { positive, x, y } => {
                        let equal = tuple[*x as usize] == tuple[*y as usize];
                        if equal == *positive {
                            // literal true under this tuple: instance vacuous
                            continue 'instances;
                        }
                        // literal false: contributes nothing
                    }
                    FoLiteral::FuncEq {
                        func,
                        positive,
                        args,
                        value,
                    } => {
                        self.grounding.clear();
                        self.grounding
                            .extend(args.iter().map(|&v| tuple[v as usize]));
                        self.grounding.push(tuple[*value as usize]);
                        self.scratch.push(codec.encode(
                            Relation::Function(*func),
                            &self.grounding,
                            *positive,
                        ));
                    }
                    FoLiteral::Pred {
                        pred,
                        positive,
                        args,
                    } => {
                        self.grounding.clear();
                        self.grounding
                            .extend(args.iter().map(|&v| tuple[v as usize]));
                        self.scratch.push(codec.encode(
                            Relation::Predicate(*pred),
                            &self.grounding,
                            *positive,
                        ));
                    }
                }
            }
            queue.push(&mut self.scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::SymbolSpace;
    use oxim_core::symbol::SymbolTable;

    fn setup(n: u32) -> (SymbolTable, SymbolSpace) {
        let mut symbols = SymbolTable::new();
        symbols.add_predicate("p", 1);
        symbols.add_predicate("r", 0);
        symbols.add_function("f", 1);
        let space = SymbolSpace::allocate(&symbols, n).unwrap();
        (symbols, space)
    }

    #[test]
    fn open_clause_yields_one_instance_per_tuple() {
        let (symbols, space) = setup(3);
        let p = match symbols.lookup("p").unwrap() {
            Relation::Predicate(p) => p,
            Relation::Function(_) => unreachable!(),
        };
        let codec = GroundingCodec::new(&symbols, &space);
        let clause = FoClause::new(vec![FoLiteral::pred(p, true, [0])]);
        let bounds = vec![u32::MAX];

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &bounds, &codec, &mut queue);

        assert_eq!(queue.len(), 3);
        // unit clauses over three distinct variables
        let vars: Vec<_> = queue
            .clauses()
            .iter()
            .map(|c| {
                assert_eq!(c.len(), 1);
                c[0].var()
            })
            .collect();
        assert_eq!(vars.len(), 3);
        assert!(vars.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn satisfied_equality_skips_the_instance() {
        let (symbols, space) = setup(2);
        let p = match symbols.lookup("p").unwrap() {
            Relation::Predicate(p) => p,
            Relation::Function(_) => unreachable!(),
        };
        let codec = GroundingCodec::new(&symbols, &space);
        // p(X0) | X0 = X1: instances with X0 == X1 are vacuous
        let clause = FoClause::new(vec![
            FoLiteral::pred(p, true, [0]),
            FoLiteral::var_eq(true, 0, 1),
        ]);
        let bounds = vec![u32::MAX, u32::MAX];

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &bounds, &codec, &mut queue);

        // of the 4 tuples, (1,1) and (2,2) are skipped; the rest lose the
        // equality literal
        assert_eq!(queue.len(), 2);
        assert!(queue.clauses().iter().all(|c| c.len() == 1));
        assert!(!queue.saw_falsified_instance());
    }

    #[test]
    fn falsified_equality_only_clause_flags_the_round() {
        let (symbols, space) = setup(2);
        let codec = GroundingCodec::new(&symbols, &space);
        // X0 != X1 alone: the tuple (1,1) falsifies the literal and empties
        // the instance
        let clause = FoClause::new(vec![FoLiteral::var_eq(false, 0, 1)]);
        let bounds = vec![u32::MAX, u32::MAX];

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &bounds, &codec, &mut queue);

        assert!(queue.saw_falsified_instance());
    }

    #[test]
    fn duplicate_literals_are_merged() {
        let (symbols, space) = setup(2);
        let p = match symbols.lookup("p").unwrap() {
            Relation::Predicate(p) => p,
            Relation::Function(_) => unreachable!(),
        };
        let codec = GroundingCodec::new(&symbols, &space);
        // p(X0) | p(X1) collapses to a unit when X0 and X1 coincide
        let clause = FoClause::new(vec![
            FoLiteral::pred(p, true, [0]),
            FoLiteral::pred(p, true, [1]),
        ]);
        let bounds = vec![u32::MAX, u32::MAX];

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &bounds, &codec, &mut queue);

        assert_eq!(queue.len(), 4);
        let unit_count = queue.clauses().iter().filter(|c| c.len() == 1).count();
        assert_eq!(unit_count, 2);
    }

    #[test]
    fn tautologies_are_dropped() {
        let (symbols, space) = setup(2);
        let p = match symbols.lookup("p").unwrap() {
            Relation::Predicate(p) => p,
            Relation::Function(_) => unreachable!(),
        };
        let codec = GroundingCodec::new(&symbols, &space);
        // p(X0) | ~p(X1): tautological when X0 == X1
        let clause = FoClause::new(vec![
            FoLiteral::pred(p, true, [0]),
            FoLiteral::pred(p, false, [1]),
        ]);
        let bounds = vec![u32::MAX, u32::MAX];

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &bounds, &codec, &mut queue);

        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn ground_clauses_do_not_depend_on_domain_size() {
        for n in [1u32, 4] {
            let (symbols, space) = setup(n);
            let r = match symbols.lookup("r").unwrap() {
                Relation::Predicate(r) => r,
                Relation::Function(_) => unreachable!(),
            };
            let codec = GroundingCodec::new(&symbols, &space);
            let symbols2 = symbols.clone();
            let problem = Problem::new(
                symbols2,
                vec![FoClause::new(vec![FoLiteral::pred(r, false, [])])],
            );

            let mut queue = ClauseQueue::new();
            let mut inst = ClauseInstantiator::new();
            inst.ground_pass(&problem, &codec, &mut queue);
            assert_eq!(queue.len(), 1);
            assert_eq!(queue.clauses()[0].len(), 1);
            assert!(!queue.clauses()[0][0].is_positive());
        }
    }

    #[test]
    fn per_variable_bounds_prune_tuples() {
        let (symbols, space) = setup(3);
        let p = match symbols.lookup("p").unwrap() {
            Relation::Predicate(p) => p,
            Relation::Function(_) => unreachable!(),
        };
        let codec = GroundingCodec::new(&symbols, &space);
        let clause = FoClause::new(vec![FoLiteral::pred(p, true, [0])]);

        let mut queue = ClauseQueue::new();
        let mut inst = ClauseInstantiator::new();
        inst.instantiate(&clause, &[2], &codec, &mut queue);
        assert_eq!(queue.len(), 2);
    }
}
