use std::time::{Duration, Instant};

use tracing::info;

use crate::sat_solver::*;
use crate::{Instance, SATSolution};

/// A wrapper for another solver which exposes time performance
/// measurement
pub struct TimedSolver<S> {
    solver: S,
}

impl<S: Solver> Solver for TimedSolver<S> {
    fn solve(&self, instance: &Instance) -> SATSolution {
        self.solve_timed(instance).1
    }
}

impl<S> TimedSolver<S> {
    pub fn new(solver: S) -> Self {
        TimedSolver { solver }
    }
}

impl<S: Solver> TimedSolver<S> {
    /// Solves a given instance but measures time additionally
    pub fn solve_timed(&self, instance: &Instance) -> (Duration, SATSolution) {
        let start = Instant::now();
        let solution = self.solver.solve(instance);
        let duration = start.elapsed();
        info!(
            elapsed_ms = duration.as_millis() as u64,
            satisfiable = solution.is_sat(),
            "solved instance"
        );
        (duration, solution)
    }
}
