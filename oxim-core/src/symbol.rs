//! First-Order Signature.
//!
//! Predicates and functions are registered up front with their arities and
//! the per-argument domain bounds supplied by upstream sort inference. A
//! function of arity `k` is viewed as a relation of arity `k + 1` relating
//! its inputs to one output value, so predicates and functions share the
//! enumeration and addressing machinery; [`Relation`] is the tagged view the
//! downstream crates work with.

use rustc_hash::FxHashMap;
use std::fmt;

/// A bound on the domain elements admissible at one relation dimension.
///
/// `UNBOUNDED` means the dimension ranges over the full current domain.
pub const UNBOUNDED: u32 = u32::MAX;

/// Identifier of a predicate symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PredId(pub u32);

/// Identifier of a function symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncId(pub u32);

impl PredId {
    /// The dense index of this predicate.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl FuncId {
    /// The dense index of this function.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered predicate symbol.
#[derive(Debug, Clone)]
pub struct PredicateInfo {
    /// Display name.
    pub name: String,
    /// Number of arguments.
    pub arity: u32,
    /// Per-argument sort bound, `UNBOUNDED` when the sort does not restrict
    /// the dimension.
    pub arg_bounds: Vec<u32>,
}

/// A registered function symbol.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Display name.
    pub name: String,
    /// Number of arguments (0 for constants).
    pub arity: u32,
    /// Per-argument sort bound.
    pub arg_bounds: Vec<u32>,
    /// Sort bound of the output value.
    pub return_bound: u32,
}

impl FunctionInfo {
    /// Whether this function is a constant (arity 0).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.arity == 0
    }
}

/// Uniform relation view over the two symbol kinds.
///
/// A function of arity `k` has `k + 1` relation dimensions; the output value
/// is the last, most significant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// A predicate symbol used as-is.
    Predicate(PredId),
    /// A function symbol viewed as an input/output relation.
    Function(FuncId),
}

/// The signature of the problem: all predicate and function symbols with
/// their arities and sort bounds.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    predicates: Vec<PredicateInfo>,
    functions: Vec<FunctionInfo>,
    names: FxHashMap<String, Relation>,
}

impl SymbolTable {
    /// Create an empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate with unbounded argument sorts.
    pub fn add_predicate(&mut self, name: &str, arity: u32) -> PredId {
        self.add_predicate_with_bounds(name, vec![UNBOUNDED; arity as usize])
    }

    /// Register a predicate with explicit per-argument bounds.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered.
    pub fn add_predicate_with_bounds(&mut self, name: &str, arg_bounds: Vec<u32>) -> PredId {
        let id = PredId(self.predicates.len() as u32);
        self.intern(name, Relation::Predicate(id));
        self.predicates.push(PredicateInfo {
            name: name.to_owned(),
            arity: arg_bounds.len() as u32,
            arg_bounds,
        });
        id
    }

    /// Register a function with unbounded argument and return sorts.
    pub fn add_function(&mut self, name: &str, arity: u32) -> FuncId {
        self.add_function_with_bounds(name, vec![UNBOUNDED; arity as usize], UNBOUNDED)
    }

    /// Register a function with explicit argument and return bounds.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered.
    pub fn add_function_with_bounds(
        &mut self,
        name: &str,
        arg_bounds: Vec<u32>,
        return_bound: u32,
    ) -> FuncId {
        let id = FuncId(self.functions.len() as u32);
        self.intern(name, Relation::Function(id));
        self.functions.push(FunctionInfo {
            name: name.to_owned(),
            arity: arg_bounds.len() as u32,
            arg_bounds,
            return_bound,
        });
        id
    }

    fn intern(&mut self, name: &str, relation: Relation) {
        let previous = self.names.insert(name.to_owned(), relation);
        assert!(previous.is_none(), "duplicate symbol name: {name}");
    }

    /// Look up a symbol by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Relation> {
        self.names.get(name).copied()
    }

    /// The registered predicate.
    #[must_use]
    pub fn predicate(&self, id: PredId) -> &PredicateInfo {
        &self.predicates[id.index()]
    }

    /// The registered function.
    #[must_use]
    pub fn function(&self, id: FuncId) -> &FunctionInfo {
        &self.functions[id.index()]
    }

    /// Number of predicate symbols.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Number of function symbols, constants included.
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// All predicate ids in registration order.
    pub fn predicate_ids(&self) -> impl Iterator<Item = PredId> + '_ {
        (0..self.predicates.len() as u32).map(PredId)
    }

    /// All function ids in registration order.
    pub fn function_ids(&self) -> impl Iterator<Item = FuncId> + '_ {
        (0..self.functions.len() as u32).map(FuncId)
    }

    /// Constants (arity-0 functions) in registration order.
    pub fn constants(&self) -> impl Iterator<Item = FuncId> + '_ {
        self.function_ids()
            .filter(|f| self.function(*f).is_constant())
    }

    /// Non-constant functions in registration order.
    pub fn proper_functions(&self) -> impl Iterator<Item = FuncId> + '_ {
        self.function_ids()
            .filter(|f| !self.function(*f).is_constant())
    }

    /// Number of constants.
    #[must_use]
    pub fn constant_count(&self) -> usize {
        self.constants().count()
    }

    /// Whether the signature is function-free apart from constants.
    ///
    /// Such problems are effectively propositional: no domain larger than
    /// the constant count yields a new model up to isomorphism.
    #[must_use]
    pub fn is_epr(&self) -> bool {
        self.proper_functions().next().is_none()
    }

    /// Number of relation dimensions of `relation` (arity, plus the output
    /// dimension for functions).
    #[must_use]
    pub fn dimensions(&self, relation: Relation) -> u32 {
        match relation {
            Relation::Predicate(p) => self.predicate(p).arity,
            Relation::Function(f) => self.function(f).arity + 1,
        }
    }

    /// The sort bound of one relation dimension.
    #[must_use]
    pub fn dimension_bound(&self, relation: Relation, dim: u32) -> u32 {
        match relation {
            Relation::Predicate(p) => self.predicate(p).arg_bounds[dim as usize],
            Relation::Function(f) => {
                let info = self.function(f);
                if dim == info.arity {
                    info.return_bound
                } else {
                    info.arg_bounds[dim as usize]
                }
            }
        }
    }

    /// Display name of a relation.
    #[must_use]
    pub fn relation_name(&self, relation: Relation) -> &str {
        match relation {
            Relation::Predicate(p) => &self.predicate(p).name,
            Relation::Function(f) => &self.function(f).name,
        }
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.predicates {
            writeln!(f, "predicate {}/{}", p.name, p.arity)?;
        }
        for func in &self.functions {
            writeln!(f, "function {}/{}", func.name, func.arity)?;
        }
        Ok(())
    }
}
