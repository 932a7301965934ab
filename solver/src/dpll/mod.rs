//! The Davis-Putnam decision procedure.
//!
//! The search simplifies the formula with pure literal elimination and unit
//! propagation until neither applies, then branches on the first unassigned
//! atom, trying `true` before `false`. Instead of copying the formula for every
//! branch, all mutations go to a [`Trail`] and are undone when the search
//! returns to a branch point. Branch points live on an explicit stack, so deep
//! searches do not grow the call stack.

pub mod formula_store;
pub mod simplifier;
pub mod trail;

use tracing::{debug, trace};

use crate::valuation::Valuation;
use crate::{Instance, SATSolution, Solver};
use formula_store::{FormulaStore, Lit};
use trail::Trail;

/// The classical recursive DPLL solver
#[derive(Clone, Copy, Debug, Default)]
pub struct DavisPutnam;

/// Counters collected during a single solve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: usize,
    pub backtracks: usize,
    pub pure_literals: usize,
    pub unit_propagations: usize,
    pub max_depth: usize,
}

/// Where the fixed-point simplification ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Simplified {
    /// No clause is left
    Success,
    /// Some clause is empty
    Failure,
    /// Neither easy case applies; a branch is needed
    Branching,
}

/// A pending branch point
#[derive(Clone, Copy, Debug)]
struct Decision {
    var: usize,
    value: bool,
    /// Trail length before the branch assignment
    checkpoint: usize,
}

struct Search {
    store: FormulaStore,
    valuation: Valuation,
    trail: Trail,
    decisions: Vec<Decision>,
    stats: SearchStats,
}

impl Solver for DavisPutnam {
    fn solve(&self, instance: &Instance) -> SATSolution {
        self.solve_with_stats(instance).0
    }
}

impl DavisPutnam {
    pub fn new() -> DavisPutnam {
        DavisPutnam
    }

    /// Solves the instance and reports how much work it took
    pub fn solve_with_stats(&self, instance: &Instance) -> (SATSolution, SearchStats) {
        debug!(
            atoms = instance.num_atoms(),
            clauses = instance.formula().len(),
            "starting Davis-Putnam search"
        );
        let mut search = Search::new(instance);
        let result = search.run();
        let stats = search.stats;

        debug!(
            satisfiable = result.is_some(),
            decisions = stats.decisions,
            backtracks = stats.backtracks,
            pure_literals = stats.pure_literals,
            unit_propagations = stats.unit_propagations,
            max_depth = stats.max_depth,
            "search finished"
        );

        let solution = match result {
            Some(values) => SATSolution::from_values(instance.universe(), values),
            None => SATSolution::Unsatisfiable,
        };
        (solution, stats)
    }
}

impl Search {
    fn new(instance: &Instance) -> Search {
        Search {
            store: FormulaStore::new(instance),
            valuation: Valuation::new(instance.num_atoms()),
            trail: Trail::new(),
            decisions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Runs until the first model is found or every branch failed
    fn run(&mut self) -> Option<Vec<bool>> {
        loop {
            match self.simplify() {
                Simplified::Success => {
                    let valuation = std::mem::replace(&mut self.valuation, Valuation::new(0));
                    return Some(valuation.complete());
                }
                Simplified::Failure => {
                    if !self.backtrack() {
                        return None;
                    }
                }
                Simplified::Branching => match self.valuation.first_unassigned() {
                    Some(var) => self.branch(var),
                    // live clauses only mention unassigned atoms
                    None => unreachable!("non-empty formula without unassigned atoms"),
                },
            }
        }
    }

    /// Applies the easy cases until a terminal state is reached or none applies
    fn simplify(&mut self) -> Simplified {
        loop {
            if self.store.is_empty() {
                return Simplified::Success;
            }
            if self.store.has_empty_clause() {
                return Simplified::Failure;
            }

            let pure = simplifier::eliminate_pure_literal(
                &mut self.store,
                &mut self.valuation,
                &mut self.trail,
            );
            if let Some(literal) = pure {
                trace!(var = literal.var, value = literal.sign, "pure literal");
                self.stats.pure_literals += 1;
                continue;
            }

            let unit = simplifier::propagate_unit_clause(
                &mut self.store,
                &mut self.valuation,
                &mut self.trail,
            );
            if let Some(literal) = unit {
                trace!(var = literal.var, value = literal.sign, "unit clause");
                self.stats.unit_propagations += 1;
                continue;
            }

            return Simplified::Branching;
        }
    }

    fn branch(&mut self, var: usize) {
        self.stats.decisions += 1;
        let decision = Decision { var, value: true, checkpoint: self.trail.checkpoint() };
        self.decisions.push(decision);
        self.stats.max_depth = self.stats.max_depth.max(self.decisions.len());
        trace!(var, depth = self.decisions.len(), "branching");
        self.assume(decision);
    }

    /// Returns to the most recent branch still holding an untried `false`
    /// and takes it. `false` if there is none left.
    fn backtrack(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            self.trail.rollback(decision.checkpoint, &mut self.store, &mut self.valuation);
            if decision.value {
                self.stats.backtracks += 1;
                let flipped = Decision { value: false, ..decision };
                self.decisions.push(flipped);
                trace!(var = decision.var, depth = self.decisions.len(), "retrying with false");
                self.assume(flipped);
                return true;
            }
        }
        false
    }

    fn assume(&mut self, decision: Decision) {
        let literal = Lit::new(decision.var, decision.value);
        self.trail.bind(&mut self.valuation, literal);
        self.store.propagate(literal, &mut self.trail);
    }
}
