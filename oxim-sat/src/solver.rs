//! The DPLL search loop.

use crate::{Lit, Var};
use tracing::debug;

/// Three-valued assignment of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LBool {
    /// Assigned true.
    True,
    /// Assigned false.
    False,
    /// Not assigned.
    #[default]
    Undef,
}

impl LBool {
    /// Whether this is [`LBool::True`].
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Self::True
    }

    /// Whether this is [`LBool::False`].
    #[must_use]
    pub fn is_false(self) -> bool {
        self == Self::False
    }
}

/// Verdict of a [`Solver::solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverResult {
    /// A satisfying assignment was found.
    Sat,
    /// The clause set is unsatisfiable.
    Unsat,
    /// The decision budget ran out before a verdict.
    Unknown,
}

/// Solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Maximum number of decisions before giving up (0 = unlimited).
    pub max_decisions: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_decisions: 0 }
    }
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverStats {
    /// Branching decisions made.
    pub decisions: u64,
    /// Literals assigned by unit propagation.
    pub propagations: u64,
    /// Conflicts hit.
    pub conflicts: u64,
}

impl SolverStats {
    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A saved branching point: where the trail stood, which variable was
/// decided, and whether the second phase has been tried yet.
#[derive(Debug, Clone, Copy)]
struct Decision {
    trail_mark: usize,
    var: Var,
    flipped: bool,
}

/// DPLL solver over packed [`Lit`] clauses.
///
/// Variables are 1-based; variable 0 is never used.
#[derive(Debug, Default)]
pub struct Solver {
    num_vars: usize,
    clauses: Vec<Vec<Lit>>,
    assign: Vec<LBool>,
    trail: Vec<Var>,
    decisions: Vec<Decision>,
    has_empty_clause: bool,
    config: SolverConfig,
    stats: SolverStats,
}

impl Solver {
    /// Create a solver with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with an explicit configuration.
    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Make variables `1..=n` available.
    pub fn ensure_num_vars(&mut self, n: u32) {
        self.num_vars = self.num_vars.max(n as usize);
    }

    /// Number of variables the solver knows about.
    #[must_use]
    pub fn num_vars(&self) -> u32 {
        self.num_vars as u32
    }

    /// Number of clauses loaded.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Add one clause. An empty clause makes the instance unsatisfiable.
    pub fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        let clause: Vec<Lit> = lits.into_iter().collect();
        if clause.is_empty() {
            self.has_empty_clause = true;
            return;
        }
        for lit in &clause {
            self.num_vars = self.num_vars.max(lit.var() as usize);
        }
        self.clauses.push(clause);
    }

    /// Decide satisfiability of the loaded clause set.
    pub fn solve(&mut self) -> SolverResult {
        if self.has_empty_clause {
            return SolverResult::Unsat;
        }

        self.assign.clear();
        self.assign.resize(self.num_vars + 1, LBool::Undef);
        self.trail.clear();
        self.decisions.clear();

        loop {
            if self.propagate_to_fixpoint() {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    debug!(conflicts = self.stats.conflicts, "unsatisfiable");
                    return SolverResult::Unsat;
                }
                continue;
            }

            let Some(var) = self.pick_branch_var() else {
                debug!(decisions = self.stats.decisions, "satisfying assignment");
                return SolverResult::Sat;
            };

            if self.config.max_decisions != 0 && self.stats.decisions >= self.config.max_decisions
            {
                return SolverResult::Unknown;
            }
            self.stats.decisions += 1;
            self.decisions.push(Decision {
                trail_mark: self.trail.len(),
                var,
                flipped: false,
            });
            self.assign_true(Lit::pos(var));
        }
    }

    /// The value of a literal under the current assignment.
    #[must_use]
    pub fn value(&self, lit: Lit) -> LBool {
        match self.assign.get(lit.var() as usize) {
            Some(LBool::True) => {
                if lit.is_positive() {
                    LBool::True
                } else {
                    LBool::False
                }
            }
            Some(LBool::False) => {
                if lit.is_positive() {
                    LBool::False
                } else {
                    LBool::True
                }
            }
            _ => LBool::Undef,
        }
    }

    /// Whether `lit` is true in the last satisfying assignment.
    ///
    /// Meaningful only after [`Solver::solve`] returned
    /// [`SolverResult::Sat`]; every known variable is assigned then.
    #[must_use]
    pub fn is_true(&self, lit: Lit) -> bool {
        self.value(lit).is_true()
    }

    /// The assignment vector, indexed by variable.
    #[must_use]
    pub fn assignment(&self) -> &[LBool] {
        &self.assign
    }

    /// Search counters.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Run unit propagation to fixpoint. Returns true on conflict.
    fn propagate_to_fixpoint(&mut self) -> bool {
        loop {
            let mut changed = false;
            for idx in 0..self.clauses.len() {
                let mut unit = None;
                let mut unassigned = 0usize;
                let mut satisfied = false;
                for i in 0..self.clauses[idx].len() {
                    let lit = self.clauses[idx][i];
                    match self.value(lit) {
                        LBool::True => {
                            satisfied = true;
                            break;
                        }
                        LBool::Undef => {
                            unassigned += 1;
                            unit = Some(lit);
                            if unassigned > 1 {
                                break;
                            }
                        }
                        LBool::False => {}
                    }
                }
                if satisfied || unassigned > 1 {
                    continue;
                }
                match unit {
                    // All literals false: conflict.
                    None => return true,
                    Some(lit) => {
                        self.assign_true(lit);
                        self.stats.propagations += 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                return false;
            }
        }
    }

    /// Undo to the most recent decision with an untried phase and flip it.
    /// Returns false when no decision is left to flip.
    fn backtrack(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            self.undo_to(decision.trail_mark);
            if !decision.flipped {
                self.decisions.push(Decision {
                    flipped: true,
                    ..decision
                });
                self.assign_true(Lit::neg(decision.var));
                return true;
            }
        }
        false
    }

    fn assign_true(&mut self, lit: Lit) {
        debug_assert_eq!(self.value(lit), LBool::Undef);
        self.assign[lit.var() as usize] = if lit.is_positive() {
            LBool::True
        } else {
            LBool::False
        };
        self.trail.push(lit.var());
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let var = self.trail.pop().expect("trail underflow");
            self.assign[var as usize] = LBool::Undef;
        }
    }

    fn pick_branch_var(&self) -> Option<Var> {
        (1..=self.num_vars)
            .find(|&v| self.assign[v] == LBool::Undef)
            .map(|v| v as Var)
    }
}
