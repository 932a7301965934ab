use std::fmt;

use super::trail::{Change, Trail};
use crate::Instance;

/// Literal over universe positions instead of atom numbers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: usize,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: usize, sign: bool) -> Lit {
        Lit { var, sign }
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit { var: self.var, sign: !self.sign }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct StoredClause {
    literals: Vec<Lit>,
    deleted: bool,
}

/// The clause set the search works on. Deleted clauses stay in place
/// and are skipped, so clause indices are stable and every mutation
/// can be undone through the [`Trail`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaStore {
    clauses: Vec<StoredClause>,
    live: usize,
    empty: usize,
}

impl FormulaStore {
    pub fn new(instance: &Instance) -> FormulaStore {
        let universe = instance.universe();
        let clauses: Vec<StoredClause> = instance
            .formula()
            .clauses
            .iter()
            .map(|clause| StoredClause {
                literals: clause
                    .literals
                    .iter()
                    // `Instance` guarantees every atom is in the universe
                    .filter_map(|l| universe.index_of(l.atom).map(|var| Lit::new(var, l.sign)))
                    .collect(),
                deleted: false,
            })
            .collect();

        let empty = clauses.iter().filter(|c| c.literals.is_empty()).count();
        FormulaStore { live: clauses.len(), empty, clauses }
    }

    /// No clause is left: everything is satisfied
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Some clause lost all of its literals: contradiction
    pub fn has_empty_clause(&self) -> bool {
        self.empty > 0
    }

    pub fn num_clauses(&self) -> usize {
        self.live
    }

    pub fn num_literals(&self) -> usize {
        self.clauses().map(|(_, literals)| literals.len()).sum()
    }

    /// Live clauses with their stable indices, in ascending order
    pub fn clauses(&self) -> impl Iterator<Item = (usize, &[Lit])> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, clause)| !clause.deleted)
            .map(|(index, clause)| (index, clause.literals.as_slice()))
    }

    /// Removes every clause that contains the literal. Returns the number
    /// of clauses removed.
    pub fn delete_clauses_containing(&mut self, literal: Lit, trail: &mut Trail) -> usize {
        let mut deleted = 0;
        for (index, clause) in self.clauses.iter_mut().enumerate() {
            if !clause.deleted && clause.literals.contains(&literal) {
                clause.deleted = true;
                trail.record(Change::ClauseDeleted(index));
                deleted += 1;
            }
        }
        self.live -= deleted;
        deleted
    }

    /// Drops every occurrence of the literal from the clauses that contain it.
    /// Clauses emptied this way are kept and show up in [`has_empty_clause`].
    ///
    /// [`has_empty_clause`]: FormulaStore::has_empty_clause
    pub fn remove_literal_everywhere(&mut self, literal: Lit, trail: &mut Trail) -> usize {
        let mut removed = 0;
        for (index, clause) in self.clauses.iter_mut().enumerate() {
            if clause.deleted {
                continue;
            }
            let before = clause.literals.len();
            while let Some(position) = clause.literals.iter().position(|l| *l == literal) {
                clause.literals.remove(position);
                trail.record(Change::LiteralRemoved { clause: index, position, literal });
                removed += 1;
            }
            if before > 0 && clause.literals.is_empty() {
                self.empty += 1;
            }
        }
        removed
    }

    /// The literal became true: clauses containing it are satisfied and its
    /// negation can no longer help any clause
    pub fn propagate(&mut self, literal: Lit, trail: &mut Trail) {
        self.delete_clauses_containing(literal, trail);
        self.remove_literal_everywhere(!literal, trail);
    }

    pub(super) fn undo(&mut self, change: Change) {
        match change {
            Change::ClauseDeleted(index) => {
                // only clauses holding a literal are ever deleted, so none was empty
                self.clauses[index].deleted = false;
                self.live += 1;
            }
            Change::LiteralRemoved { clause, position, literal } => {
                let clause = &mut self.clauses[clause];
                if clause.literals.is_empty() {
                    self.empty -= 1;
                }
                clause.literals.insert(position, literal);
            }
            Change::Bound(_) => (),
        }
    }
}

impl fmt::Display for FormulaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, literals) in self.clauses() {
            write!(f, "{}:", index)?;
            for literal in literals {
                write!(f, " {}{}", if literal.sign { "" } else { "-" }, literal.var)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
