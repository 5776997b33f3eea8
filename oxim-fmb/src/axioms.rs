//! Structural Axioms.
//!
//! The relation view of a function says nothing about being a function;
//! these generators restore that: at most one output per input
//! (functionality), at least one output per input (totality), and a
//! canonical use of domain elements (symmetry breaking). All three walk
//! tuple spaces through the shared odometer.

use crate::codec::GroundingCodec;
use crate::instantiate::ClauseQueue;
use crate::odometer::Odometer;
use oxim_core::literal::Lit;
use oxim_core::symbol::{FuncId, Relation, SymbolTable};
use smallvec::SmallVec;

/// The symmetry-breaking order: constants first, then proper functions,
/// both in registration order. Fixed at setup; round `s` of symmetry
/// breaking is a pure function of `s` and this ledger, so regenerating
/// rounds `1..=n` after a domain grow revisits no choice differently.
#[derive(Debug, Clone)]
pub struct SymmetryLedger {
    constants: Vec<FuncId>,
    functions: Vec<FuncId>,
}

impl SymmetryLedger {
    /// Collect the ledger from a signature.
    #[must_use]
    pub fn new(symbols: &SymbolTable) -> Self {
        Self {
            constants: symbols.constants().collect(),
            functions: symbols.proper_functions().collect(),
        }
    }

    /// Number of constants available for symmetry breaking.
    #[must_use]
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }
}

/// Generator for the three axiom families.
#[derive(Debug, Default)]
pub struct AxiomGenerator {
    scratch: SmallVec<[Lit; 8]>,
    grounding: SmallVec<[u32; 8]>,
}

impl AxiomGenerator {
    /// A fresh generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// At most one output per input: for every function `f` and input
    /// tuple `x`, forbid two distinct outputs `y != z` via
    /// `~f(x,y) | ~f(x,z)`.
    pub fn functionality(&mut self, codec: &GroundingCodec<'_>, queue: &mut ClauseQueue) {
        let symbols = codec.symbols();
        let n = codec.domain_size();

        for f in symbols.function_ids() {
            let info = symbols.function(f);
            let out = info.return_bound.min(n);

            // two output candidates first, then the inputs
            let mut maxes = vec![out, out];
            maxes.extend(info.arg_bounds.iter().map(|&b| b.min(n)));

            let mut odo = Odometer::new(maxes);
            while odo.advance() {
                let tuple = odo.digits();
                let (y, z) = (tuple[0], tuple[1]);
                if y == z {
                    continue;
                }
                self.scratch.clear();
                self.grounding.clear();
                self.grounding.extend_from_slice(&tuple[2..]);
                self.grounding.push(y);
                self.scratch
                    .push(codec.encode(Relation::Function(f), &self.grounding, false));
                let last = self.grounding.len() - 1;
                self.grounding[last] = z;
                self.scratch
                    .push(codec.encode(Relation::Function(f), &self.grounding, false));
                queue.push(&mut self.scratch);
            }
        }
    }

    /// At least one output per input: for every function `f` and input
    /// tuple `x`, require `f(x,1) | .. | f(x,d)` up to the output bound.
    /// Constants fall out of the same loop as the single empty input tuple.
    pub fn totality(&mut self, codec: &GroundingCodec<'_>, queue: &mut ClauseQueue) {
        let symbols = codec.symbols();
        let n = codec.domain_size();

        for f in symbols.function_ids() {
            let info = symbols.function(f);
            let out = info.return_bound.min(n);
            let maxes: Vec<u32> = info.arg_bounds.iter().map(|&b| b.min(n)).collect();

            let mut odo = Odometer::new(maxes);
            while odo.advance() {
                self.scratch.clear();
                for d in 1..=out {
                    self.grounding.clear();
                    self.grounding.extend_from_slice(odo.digits());
                    self.grounding.push(d);
                    self.scratch
                        .push(codec.encode(Relation::Function(f), &self.grounding, true));
                }
                queue.push(&mut self.scratch);
            }
        }
    }

    /// One unit of symmetry breaking for round `s` (1-based).
    ///
    /// While unused constants remain, the `s`-th constant is confined to
    /// the first `s` domain elements, and canonicity clauses force earlier
    /// constants to occupy a value before a later constant may take its
    /// successor. Once constants are exhausted, one function-table row per
    /// round is confined the same way; with no constants at all there is
    /// nothing to anchor the order and no axiom is produced.
    pub fn symmetry(
        &mut self,
        ledger: &SymmetryLedger,
        codec: &GroundingCodec<'_>,
        queue: &mut ClauseQueue,
        s: u32,
    ) {
        let c = ledger.constants.len() as u32;
        if c == 0 {
            return;
        }

        if s <= c {
            self.constant_symmetry(ledger, codec, queue, s);
        } else {
            self.function_row_symmetry(ledger, codec, queue, s, c);
        }
    }

    fn constant_symmetry(
        &mut self,
        ledger: &SymmetryLedger,
        codec: &GroundingCodec<'_>,
        queue: &mut ClauseQueue,
        s: u32,
    ) {
        let current = ledger.constants[(s - 1) as usize];

        // restricted totality: the s-th constant lives in {1..s}
        self.scratch.clear();
        for d in 1..=s {
            self.scratch
                .push(codec.encode(Relation::Function(current), &[d], true));
        }
        queue.push(&mut self.scratch);

        // canonicity: current = d+1 requires some earlier constant = d
        for d in 1..s {
            self.scratch.clear();
            self.scratch
                .push(codec.encode(Relation::Function(current), &[d + 1], false));
            for earlier in &ledger.constants[..(s - 1) as usize] {
                self.scratch
                    .push(codec.encode(Relation::Function(*earlier), &[d], true));
            }
            queue.push(&mut self.scratch);
        }
    }

    fn function_row_symmetry(
        &mut self,
        ledger: &SymmetryLedger,
        codec: &GroundingCodec<'_>,
        queue: &mut ClauseQueue,
        s: u32,
        c: u32,
    ) {
        let index = (s / c) as usize;
        let Some(&f) = ledger.functions.get(index) else {
            return;
        };
        let arity = codec.symbols().function(f).arity as usize;

        // the row anchored at one of the first c domain elements
        let row_element = (s % c) + 1;

        self.scratch.clear();
        for d in 1..=s {
            self.grounding.clear();
            self.grounding.resize(arity, row_element);
            self.grounding.push(d);
            self.scratch
                .push(codec.encode(Relation::Function(f), &self.grounding, true));
        }
        queue.push(&mut self.scratch);
    }
}
