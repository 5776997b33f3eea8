//! Model Extraction.
//!
//! Reads a satisfying assignment back into an explicit finite
//! interpretation: one value per constant, one output per function row, one
//! truth value per predicate row. The derivation is deterministic (symbols
//! in registration order, rows in odometer order, candidates scanned
//! upward); how the result is rendered is the caller's business.

use crate::backend::SatBackend;
use crate::codec::GroundingCodec;
use crate::odometer::Odometer;
use oxim_core::symbol::Relation;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// One function-table row: argument tuple and output value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRow {
    /// Argument elements.
    pub args: Vec<u32>,
    /// The output element.
    pub value: u32,
}

/// The full table of one non-constant function.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTable {
    /// Function name.
    pub name: String,
    /// All rows in odometer order.
    pub rows: Vec<FunctionRow>,
}

/// One predicate-table row: argument tuple and truth value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateRow {
    /// Argument elements.
    pub args: Vec<u32>,
    /// Whether the predicate holds on them.
    pub holds: bool,
}

/// The full table of one non-propositional predicate.
#[derive(Debug, Clone, Serialize)]
pub struct PredicateTable {
    /// Predicate name.
    pub name: String,
    /// All rows in odometer order.
    pub rows: Vec<PredicateRow>,
}

/// An explicit finite interpretation over `{1..domain_size}`.
///
/// The domain elements are pairwise distinct by construction; the tables
/// list every symbol of the signature.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    /// Size of the universe.
    pub domain_size: u32,
    /// Value of each constant, in registration order.
    pub constants: Vec<(String, u32)>,
    /// Tables of non-constant functions.
    pub functions: Vec<FunctionTable>,
    /// Truth of each zero-arity predicate.
    pub propositions: Vec<(String, bool)>,
    /// Tables of predicates with arguments.
    pub predicates: Vec<PredicateTable>,
}

impl Interpretation {
    /// Derive the interpretation from a satisfying assignment.
    ///
    /// # Panics
    ///
    /// Panics when some function row has no true output literal; the
    /// totality axioms guarantee one, so its absence means the backend
    /// broke its contract.
    #[must_use]
    pub fn extract(codec: &GroundingCodec<'_>, backend: &dyn SatBackend) -> Self {
        let symbols = codec.symbols();
        let n = codec.domain_size();

        let mut constants = Vec::new();
        let mut functions = Vec::new();
        for f in symbols.function_ids() {
            let info = symbols.function(f);
            let out = info.return_bound.min(n);

            if info.is_constant() {
                let value = Self::scan_output(codec, backend, Relation::Function(f), &[], out);
                constants.push((info.name.clone(), value));
                continue;
            }

            let maxes: Vec<u32> = info.arg_bounds.iter().map(|&b| b.min(n)).collect();
            let mut rows = Vec::new();
            let mut odo = Odometer::new(maxes);
            while odo.advance() {
                let value =
                    Self::scan_output(codec, backend, Relation::Function(f), odo.digits(), out);
                rows.push(FunctionRow {
                    args: odo.digits().to_vec(),
                    value,
                });
            }
            functions.push(FunctionTable {
                name: info.name.clone(),
                rows,
            });
        }

        let mut propositions = Vec::new();
        let mut predicates = Vec::new();
        for p in symbols.predicate_ids() {
            let info = symbols.predicate(p);
            if info.arity == 0 {
                let lit = codec.encode(Relation::Predicate(p), &[], true);
                propositions.push((info.name.clone(), backend.is_true(lit)));
                continue;
            }

            let maxes: Vec<u32> = info.arg_bounds.iter().map(|&b| b.min(n)).collect();
            let mut rows = Vec::new();
            let mut odo = Odometer::new(maxes);
            while odo.advance() {
                let lit = codec.encode(Relation::Predicate(p), odo.digits(), true);
                rows.push(PredicateRow {
                    args: odo.digits().to_vec(),
                    holds: backend.is_true(lit),
                });
            }
            predicates.push(PredicateTable {
                name: info.name.clone(),
                rows,
            });
        }

        Self {
            domain_size: n,
            constants,
            functions,
            propositions,
            predicates,
        }
    }

    /// First output candidate whose literal is true.
    fn scan_output(
        codec: &GroundingCodec<'_>,
        backend: &dyn SatBackend,
        relation: Relation,
        args: &[u32],
        out: u32,
    ) -> u32 {
        let mut grounding: SmallVec<[u32; 8]> = SmallVec::from_slice(args);
        grounding.push(0);
        for d in 1..=out {
            let last = grounding.len() - 1;
            grounding[last] = d;
            if backend.is_true(codec.encode(relation, &grounding, true)) {
                return d;
            }
        }
        panic!("assignment breaks totality: no output for a function row");
    }

    /// Look up a constant's value by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<u32> {
        self.constants
            .iter()
            .find(|(c, _)| c == name)
            .map(|&(_, v)| v)
    }

    /// Look up a proposition's truth by name.
    #[must_use]
    pub fn proposition(&self, name: &str) -> Option<bool> {
        self.propositions
            .iter()
            .find(|(p, _)| p == name)
            .map(|&(_, v)| v)
    }

    /// Look up one predicate row by name and arguments.
    #[must_use]
    pub fn predicate_holds(&self, name: &str, args: &[u32]) -> Option<bool> {
        self.predicates
            .iter()
            .find(|t| t.name == name)?
            .rows
            .iter()
            .find(|r| r.args == args)
            .map(|r| r.holds)
    }

    /// Look up one function row by name and arguments.
    #[must_use]
    pub fn function_value(&self, name: &str, args: &[u32]) -> Option<u32> {
        self.functions
            .iter()
            .find(|t| t.name == name)?
            .rows
            .iter()
            .find(|r| r.args == args)
            .map(|r| r.value)
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "domain: {{1..{}}}, elements pairwise distinct", self.domain_size)?;
        for (name, value) in &self.constants {
            writeln!(f, "{name} = {value}")?;
        }
        for table in &self.functions {
            for row in &table.rows {
                writeln!(f, "{}{:?} = {}", table.name, row.args, row.value)?;
            }
        }
        for (name, holds) in &self.propositions {
            writeln!(f, "{}{name}", if *holds { "" } else { "~" })?;
        }
        for table in &self.predicates {
            for row in &table.rows {
                writeln!(
                    f,
                    "{}{}{:?}",
                    if row.holds { "" } else { "~" },
                    table.name,
                    row.args
                )?;
            }
        }
        Ok(())
    }
}
