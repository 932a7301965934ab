use std::hash::BuildHasherDefault;
use std::iter::FromIterator;

use indexmap::IndexSet;
use rustc_hash::FxHasher;

use crate::cnf::{Atom, Formula};
use crate::error::InputError;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// The set of atoms a formula talks about. Iteration order is insertion
/// order and decides tie-breaks during the search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Universe {
    atoms: IndexSet<Atom, FxBuildHasher>,
}

impl Universe {
    pub fn new() -> Universe {
        Universe::default()
    }

    /// Adds an atom at the end of the iteration order. Returns `false`
    /// if it was already present.
    pub fn insert(&mut self, atom: Atom) -> bool {
        self.atoms.insert(atom)
    }

    pub fn contains(&self, atom: Atom) -> bool {
        self.atoms.contains(&atom)
    }

    /// Position of the atom in the iteration order
    pub fn index_of(&self, atom: Atom) -> Option<usize> {
        self.atoms.get_index_of(&atom)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Atom> + '_ {
        self.atoms.iter().copied()
    }
}

impl FromIterator<Atom> for Universe {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Universe { atoms: iter.into_iter().collect() }
    }
}

/// A formula together with the universe it is solved over.
/// Construction checks that every literal refers to an atom of the universe,
/// so solvers may rely on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    universe: Universe,
    formula: Formula,
}

impl Instance {
    pub fn new(universe: Universe, formula: Formula) -> Result<Instance, InputError> {
        if universe.contains(0) {
            return Err(InputError::ZeroAtom);
        }
        if universe.is_empty() && !formula.is_empty() {
            return Err(InputError::EmptyUniverse { clauses: formula.len() });
        }
        for (clause, literals) in formula.clauses.iter().enumerate() {
            if let Some(literal) = literals.literals.iter().find(|l| !universe.contains(l.atom)) {
                return Err(InputError::UnknownAtom { atom: literal.atom, clause });
            }
        }
        Ok(Instance { universe, formula })
    }

    /// Uses the atoms of the formula in order of first appearance
    /// as the universe
    pub fn from_formula(formula: Formula) -> Result<Instance, InputError> {
        let universe = formula.atoms().into_iter().collect();
        Instance::new(universe, formula)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn num_atoms(&self) -> usize {
        self.universe.len()
    }
}
