use super::formula_store::{FormulaStore, Lit};
use crate::valuation::Valuation;

/// A single reversible mutation of the search state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The atom at this universe position got a value
    Bound(usize),
    /// The clause was satisfied and dropped
    ClauseDeleted(usize),
    /// A falsified literal was taken out of a clause at the given position
    LiteralRemoved { clause: usize, position: usize, literal: Lit },
}

/// Undo log of everything the search did since the beginning.
/// Rolling back to a checkpoint restores the formula and valuation
/// exactly as they were when the checkpoint was taken.
#[derive(Debug, Default)]
pub struct Trail {
    changes: Vec<Change>,
}

impl Trail {
    pub fn new() -> Trail {
        Trail::default()
    }

    pub fn record(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn checkpoint(&self) -> usize {
        self.changes.len()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Makes the literal true in the valuation
    pub fn bind(&mut self, valuation: &mut Valuation, literal: Lit) {
        valuation.assign(literal.var, literal.sign);
        self.record(Change::Bound(literal.var));
    }

    pub fn rollback(
        &mut self,
        checkpoint: usize,
        store: &mut FormulaStore,
        valuation: &mut Valuation,
    ) {
        while self.changes.len() > checkpoint {
            match self.changes.pop() {
                Some(Change::Bound(var)) => valuation.unassign(var),
                Some(change) => store.undo(change),
                None => break,
            }
        }
    }
}
