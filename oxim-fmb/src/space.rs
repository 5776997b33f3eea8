//! Symbol Address Space.
//!
//! Every symbol owns a contiguous block of propositional variables sized to
//! hold all groundings of its relation at the current domain size. The
//! layout is an immutable value rebuilt from scratch for every domain size,
//! which makes the "discard and retry one size larger" step of the search
//! trivially correct.

use oxim_core::error::{OximError, Result};
use oxim_core::literal::{Var, MAX_VAR};
use oxim_core::symbol::{Relation, SymbolTable};
use tracing::debug;

/// Per-domain-size variable layout: one base address per symbol.
///
/// Blocks are allocated functions first, then predicates, starting at
/// variable 1. A function block reserves one dimension more than its
/// `arity + 1` grounding dimensions; the spare dimension keeps the block
/// comfortably clear of its neighbour and is retained on purpose.
#[derive(Debug, Clone)]
pub struct SymbolSpace {
    domain_size: u32,
    func_base: Vec<Var>,
    pred_base: Vec<Var>,
    var_count: u32,
}

impl SymbolSpace {
    /// Compute the layout for `domain_size`.
    ///
    /// # Errors
    ///
    /// Returns [`OximError::AddressOverflow`] when some block would push the
    /// total past the representable variable ceiling. The search treats
    /// this as a give-up signal, not a fault.
    pub fn allocate(symbols: &SymbolTable, domain_size: u32) -> Result<Self> {
        assert!(domain_size >= 1, "domain size must be positive");

        let ceiling = u64::from(MAX_VAR);
        let mut next: u64 = 1;

        let mut func_base = Vec::with_capacity(symbols.function_count());
        for f in symbols.function_ids() {
            let arity = symbols.function(f).arity;
            func_base.push(next as Var);
            next = Self::grow(next, domain_size, arity + 2, ceiling).ok_or_else(|| {
                OximError::AddressOverflow {
                    domain_size,
                    symbol: symbols.function(f).name.clone(),
                    ceiling: MAX_VAR,
                }
            })?;
        }

        let mut pred_base = Vec::with_capacity(symbols.predicate_count());
        for p in symbols.predicate_ids() {
            let arity = symbols.predicate(p).arity;
            pred_base.push(next as Var);
            next = Self::grow(next, domain_size, arity + 1, ceiling).ok_or_else(|| {
                OximError::AddressOverflow {
                    domain_size,
                    symbol: symbols.predicate(p).name.clone(),
                    ceiling: MAX_VAR,
                }
            })?;
        }

        let var_count = (next - 1) as u32;
        debug!(domain_size, var_count, "allocated symbol space");

        Ok(Self {
            domain_size,
            func_base,
            pred_base,
            var_count,
        })
    }

    /// Advance `next` past a block of `domain_size ^ dims` variables,
    /// refusing to pass `ceiling`.
    fn grow(next: u64, domain_size: u32, dims: u32, ceiling: u64) -> Option<u64> {
        let block = u64::from(domain_size).checked_pow(dims)?;
        let end = next.checked_add(block)?;
        if end - 1 > ceiling {
            return None;
        }
        Some(end)
    }

    /// The domain size this layout was computed for.
    #[must_use]
    pub fn domain_size(&self) -> u32 {
        self.domain_size
    }

    /// Total number of variables reserved; the backend must know about all
    /// of them before solving.
    #[must_use]
    pub fn var_count(&self) -> u32 {
        self.var_count
    }

    /// Base address of a symbol's block.
    #[must_use]
    pub fn base(&self, relation: Relation) -> Var {
        match relation {
            Relation::Function(f) => self.func_base[f.index()],
            Relation::Predicate(p) => self.pred_base[p.index()],
        }
    }
}
