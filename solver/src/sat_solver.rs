use rayon::prelude::*;

use crate::{Formula, Instance, Model, SATSolution};

pub trait Solver {
    fn solve(&self, instance: &Instance) -> SATSolution;
}

/// Checks whether every clause of the formula has a literal that
/// the model makes true. Atoms missing from the model satisfy nothing.
pub fn check_model(formula: &Formula, model: &Model) -> bool {
    formula
        .clauses
        .par_iter()
        .all(|clause| clause.is_satisfied_by(|atom| model.get(&atom).copied()))
}

impl<T: Solver + ?Sized> Solver for &T {
    fn solve(&self, instance: &Instance) -> SATSolution {
        (**self).solve(instance)
    }
}

impl<T: Solver + ?Sized> Solver for Box<T> {
    fn solve(&self, instance: &Instance) -> SATSolution {
        (**self).solve(instance)
    }
}
