//! Iterative-Deepening Search.
//!
//! Grows the domain one element at a time. Every round rebuilds the address
//! layout, the backend, and the full propositional clause set from scratch;
//! nothing propositional survives a round. What does persist is computed
//! once at setup and read-only afterwards: the per-clause variable bounds,
//! the maximum-model-size bound, and the symmetry ledger.
//!
//! A refutation verdict is only ever produced when a maximum model size was
//! actually established and reached; everything else that stops the search
//! is a give-up, not a proof.

use crate::axioms::{AxiomGenerator, SymmetryLedger};
use crate::backend::{create_backend, SatBackend, SatVerdict};
use crate::bounds::{clause_variable_bounds, max_model_size};
use crate::codec::GroundingCodec;
use crate::instantiate::{ClauseInstantiator, ClauseQueue};
use crate::model::Interpretation;
use crate::space::SymbolSpace;
use oxim_core::clause::Problem;
use oxim_core::config::FinderConfig;
use oxim_core::error::OximError;
use oxim_core::resource::{LimitStatus, ResourceManager};
use tracing::{debug, info};

/// Why the search stopped without a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The address space for the next domain size is not representable.
    RepresentationOverflow,
    /// The wall-clock budget ran out at a round boundary.
    TimeLimit,
    /// The backend gave up, the domain cap was hit, or the domain size ran
    /// out of representable values.
    Unknown,
}

/// Terminal outcome of a search.
#[derive(Debug, Clone)]
pub enum FinderResult {
    /// A finite model exists; here is its interpretation.
    Satisfiable(Box<Interpretation>),
    /// No finite model exists: the maximum model size was reached with an
    /// unsatisfiable encoding.
    Refuted,
    /// No verdict.
    GaveUp(GiveUpReason),
}

impl FinderResult {
    /// Whether the search found a model.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// Whether the search proved no finite model exists.
    #[must_use]
    pub fn is_refuted(&self) -> bool {
        matches!(self, Self::Refuted)
    }
}

/// Search counters, cumulative over all rounds of one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Rounds started.
    pub rounds: u32,
    /// Largest domain size attempted.
    pub max_domain_size: u32,
    /// Propositional clauses generated, summed over rounds.
    pub clauses_generated: u64,
    /// Largest variable count registered with a backend.
    pub max_vars: u32,
}

/// One round's transient state: layout, backend, generated clauses.
struct Round {
    space: SymbolSpace,
    backend: Box<dyn SatBackend>,
    queue: ClauseQueue,
}

/// The controller's position in the round state machine.
enum SearchState {
    /// Building the encoding for the given domain size.
    Sizing(u32),
    /// Encoding built; awaiting the backend verdict.
    Solving(u32, Round),
    /// Terminal.
    Done(FinderResult),
}

/// Finite model finder: decides finite satisfiability of a [`Problem`] by
/// iterative deepening over the domain size.
#[derive(Debug)]
pub struct FiniteModelFinder {
    problem: Problem,
    config: FinderConfig,
    open_clause_bounds: Vec<Vec<u32>>,
    max_model_size: Option<u32>,
    ledger: SymmetryLedger,
    resources: ResourceManager,
    instantiator: ClauseInstantiator,
    axioms: AxiomGenerator,
    stats: SearchStats,
}

impl FiniteModelFinder {
    /// Set up a search: derive the variable-bound tables, the maximum
    /// model size, and the symmetry ledger. All three stay fixed for the
    /// lifetime of the finder.
    #[must_use]
    pub fn new(problem: Problem, config: FinderConfig) -> Self {
        let open_clause_bounds = problem
            .open_clauses
            .iter()
            .map(|c| clause_variable_bounds(c, &problem.symbols))
            .collect();
        let max_model_size = max_model_size(&problem);
        let ledger = SymmetryLedger::new(&problem.symbols);
        let resources = ResourceManager::new(config.limits);

        Self {
            problem,
            config,
            open_clause_bounds,
            max_model_size,
            ledger,
            resources,
            instantiator: ClauseInstantiator::new(),
            axioms: AxiomGenerator::new(),
            stats: SearchStats::default(),
        }
    }

    /// The maximum model size established at setup, if any.
    #[must_use]
    pub fn max_model_size(&self) -> Option<u32> {
        self.max_model_size
    }

    /// Cumulative search counters.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run the search to a terminal state.
    pub fn run(&mut self) -> FinderResult {
        if self.problem.trivially_refuted {
            info!("input contains the empty clause");
            return FinderResult::Refuted;
        }

        self.resources.start();
        let mut state = SearchState::Sizing(1);
        loop {
            state = match state {
                SearchState::Sizing(n) => self.size_round(n),
                SearchState::Solving(n, round) => self.solve_round(n, round),
                SearchState::Done(result) => {
                    info!(rounds = self.stats.rounds, "search finished");
                    return result;
                }
            };
        }
    }

    /// Build the encoding for domain size `n`.
    fn size_round(&mut self, n: u32) -> SearchState {
        if self.resources.check() == LimitStatus::TimeExceeded {
            return SearchState::Done(FinderResult::GaveUp(GiveUpReason::TimeLimit));
        }
        if !self.resources.domain_size_allowed(n) {
            return SearchState::Done(FinderResult::GaveUp(GiveUpReason::Unknown));
        }

        let space = match SymbolSpace::allocate(&self.problem.symbols, n) {
            Ok(space) => space,
            Err(OximError::AddressOverflow { .. }) => {
                return SearchState::Done(FinderResult::GaveUp(
                    GiveUpReason::RepresentationOverflow,
                ));
            }
            Err(_) => return SearchState::Done(FinderResult::GaveUp(GiveUpReason::Unknown)),
        };

        self.stats.rounds += 1;
        self.stats.max_domain_size = self.stats.max_domain_size.max(n);

        let mut backend = create_backend(self.config.backend);
        backend.ensure_num_vars(space.var_count());
        self.stats.max_vars = self.stats.max_vars.max(space.var_count());

        let codec = GroundingCodec::new(&self.problem.symbols, &space);
        let mut queue = ClauseQueue::new();

        self.instantiator
            .ground_pass(&self.problem, &codec, &mut queue);
        for (clause, bounds) in self
            .problem
            .open_clauses
            .iter()
            .zip(&self.open_clause_bounds)
        {
            self.instantiator
                .instantiate(clause, bounds, &codec, &mut queue);
        }
        self.axioms.functionality(&codec, &mut queue);
        self.axioms.totality(&codec, &mut queue);
        if self.config.enable_symmetry_breaking {
            for s in 1..=n {
                self.axioms.symmetry(&self.ledger, &codec, &mut queue, s);
            }
        }

        self.stats.clauses_generated += queue.len() as u64;
        debug!(
            domain_size = n,
            vars = space.var_count(),
            clauses = queue.len(),
            "encoding built"
        );

        SearchState::Solving(
            n,
            Round {
                space,
                backend,
                queue,
            },
        )
    }

    /// Submit the round to the backend and act on the verdict.
    fn solve_round(&mut self, n: u32, round: Round) -> SearchState {
        let Round {
            space,
            mut backend,
            queue,
        } = round;

        let verdict = if queue.saw_falsified_instance() {
            // some instance collapsed to the empty clause: no assignment of
            // this size can work
            debug!(domain_size = n, "falsified instance, round unsatisfiable");
            SatVerdict::Unsat
        } else {
            backend.add_clauses(queue.clauses());
            backend.solve()
        };

        match verdict {
            SatVerdict::Sat => {
                info!(domain_size = n, "found finite model");
                let codec = GroundingCodec::new(&self.problem.symbols, &space);
                let interpretation = Interpretation::extract(&codec, backend.as_ref());
                SearchState::Done(FinderResult::Satisfiable(Box::new(interpretation)))
            }
            SatVerdict::Unsat => {
                if let Some(bound) = self.max_model_size {
                    if n >= bound {
                        info!(bound, "maximum model size exhausted, refuted");
                        return SearchState::Done(FinderResult::Refuted);
                    }
                }
                if n == u32::MAX {
                    return SearchState::Done(FinderResult::GaveUp(GiveUpReason::Unknown));
                }
                SearchState::Sizing(n + 1)
            }
            SatVerdict::Unknown => {
                SearchState::Done(FinderResult::GaveUp(GiveUpReason::Unknown))
            }
        }
    }
}
