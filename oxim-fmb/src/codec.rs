//! Grounding Codec.
//!
//! Maps (relation, grounding tuple, polarity) to a propositional literal.
//! Within one domain size the mapping is injective: tuple digits form a
//! base-`n` number added to the symbol's block base, first dimension least
//! significant. Nothing in the search decodes literals back; tests decode
//! exhaustively for small domains instead.

use crate::space::SymbolSpace;
use oxim_core::literal::{Lit, Var, MAX_VAR};
use oxim_core::symbol::{Relation, SymbolTable};

/// Encoder from groundings to SAT literals for one domain size.
#[derive(Debug, Clone, Copy)]
pub struct GroundingCodec<'a> {
    symbols: &'a SymbolTable,
    space: &'a SymbolSpace,
}

impl<'a> GroundingCodec<'a> {
    /// Pair a signature with its current address layout.
    #[must_use]
    pub fn new(symbols: &'a SymbolTable, space: &'a SymbolSpace) -> Self {
        Self { symbols, space }
    }

    /// The domain size of the underlying layout.
    #[must_use]
    pub fn domain_size(&self) -> u32 {
        self.space.domain_size()
    }

    /// The signature this codec encodes for.
    #[must_use]
    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Encode one grounding of `relation` as a literal.
    ///
    /// For functions the tuple is the argument elements followed by the
    /// output element. Domain elements are 1-based.
    ///
    /// # Panics
    ///
    /// Panics when the tuple length disagrees with the relation dimensions
    /// or an element lies outside `1..=domain_size`; a malformed grounding
    /// must never be silently encoded.
    #[must_use]
    pub fn encode(&self, relation: Relation, tuple: &[u32], positive: bool) -> Lit {
        let dims = self.symbols.dimensions(relation) as usize;
        assert_eq!(
            tuple.len(),
            dims,
            "grounding of {} must have {dims} elements",
            self.symbols.relation_name(relation)
        );

        let n = u64::from(self.space.domain_size());
        let mut address = u64::from(self.space.base(relation));
        let mut mult = 1u64;
        for &element in tuple {
            assert!(
                element >= 1 && u64::from(element) <= n,
                "domain element {element} outside 1..={n}"
            );
            address += mult * u64::from(element - 1);
            mult *= n;
        }

        debug_assert!(address <= u64::from(MAX_VAR));
        Lit::new(address as Var, positive)
    }
}
