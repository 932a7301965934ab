use crate::sat_solver::*;
use crate::{Instance, Model, SATSolution};

/// A simple CNF solver that naively checks all possible
/// valuations in order to ensure satisfiability
pub enum Bruteforce {
    Bruteforce,
}

impl Solver for Bruteforce {
    fn solve(&self, instance: &Instance) -> SATSolution {
        // initial valuation sets all to false
        let mut model: Model = instance.universe().iter().map(|atom| (atom, false)).collect();
        if guess(instance, 0, &mut model) {
            SATSolution::Satisfiable(model)
        } else {
            SATSolution::Unsatisfiable
        }
    }
}

fn guess(instance: &Instance, change: usize, model: &mut Model) -> bool {
    if change == model.len() {
        check_model(instance.formula(), model)
    } else if guess(instance, change + 1, model) {
        true
    } else {
        // set current bit
        set(model, change, true);
        // try again
        let res = guess(instance, change + 1, model);
        if !res {
            // if failed set back to default
            set(model, change, false);
        }
        res
    }
}

fn set(model: &mut Model, index: usize, value: bool) {
    if let Some((_, slot)) = model.get_index_mut(index) {
        *slot = value;
    }
}
