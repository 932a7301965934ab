use std::fmt;
use std::iter::FromIterator;

use dimacs::parse_dimacs;
use itertools::Itertools;
use rayon::iter::*;

use crate::error::FormatError;

/// Type used for referencing propositional atoms. Atoms are positive.
pub type Atom = usize;

/// Representation of logical formulae in CNF form
/// (conjunction of clauses)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    /// Vector of inner clauses
    pub clauses: Vec<Clause>,
}

/// Representation of a clause (disjunction of literals).
/// Duplicated literals are kept as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    /// Vector of inner literals
    pub literals: Vec<Literal>,
}

/// An atom asserted true or false
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// Referenced atom
    pub atom: Atom,
    /// Literal is negated iff `sign == false`
    pub sign: bool,
}

impl Formula {
    /// Creates an empty formula, which is trivially satisfied
    pub fn empty() -> Formula {
        Formula { clauses: Vec::new() }
    }

    /// Creates a singleton formula out of a single clause
    pub fn single(clause: Clause) -> Formula {
        Formula { clauses: vec![clause] }
    }

    /// Inserts a new clause into the formula
    pub fn push(&mut self, c: Clause) {
        self.clauses.push(c)
    }

    /// Returns number of clauses in the formula
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Atoms in order of their first appearance
    pub fn atoms(&self) -> Vec<Atom> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter().map(Literal::atom))
            .unique()
            .collect()
    }

    /// Builds a formula out of signed integers, `None` if any of them is zero
    pub fn from_signed<C, L>(clauses: C) -> Option<Formula>
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i64>,
    {
        clauses
            .into_iter()
            .map(|clause| clause.into_iter().map(Literal::from_signed).collect::<Option<Clause>>())
            .collect()
    }

    /// Prints formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let num_vars = self.atoms().into_iter().max().unwrap_or(0);
        let mut out = format!("p cnf {} {}\n", num_vars, self.clauses.len());

        for clause in &self.clauses {
            for literal in &clause.literals {
                out.push_str(&literal.to_signed().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse DIMACS string into a formula
    pub fn from_dimacs(input: &str) -> Result<Formula, FormatError> {
        match parse_dimacs(input) {
            Ok(dimacs::Instance::Cnf { clauses, .. }) => Ok(clauses
                .iter()
                .map(|clause| {
                    clause
                        .lits()
                        .iter()
                        .map(|lit| Literal {
                            atom: lit.var().to_u64() as Atom,
                            sign: lit.sign() == dimacs::Sign::Pos,
                        })
                        .collect::<Clause>()
                })
                .collect()),
            Ok(_) => Err(FormatError::NotCnf),
            Err(e) => Err(FormatError::Dimacs(format!("{:?}", e))),
        }
    }
}

impl FromParallelIterator<Clause> for Formula {
    fn from_par_iter<I: IntoParallelIterator<Item = Clause>>(iter: I) -> Self {
        Formula { clauses: iter.into_par_iter().collect() }
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Formula { clauses: iter.into_iter().collect() }
    }
}

impl IntoIterator for Formula {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl Clause {
    /// Creates a clause containing a single literal
    pub fn single(literal: Literal) -> Clause {
        Clause { literals: vec![literal] }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether the clause holds under a total assignment given as a lookup
    pub fn is_satisfied_by(&self, value_of: impl Fn(Atom) -> Option<bool>) -> bool {
        self.literals
            .iter()
            .any(|literal| value_of(literal.atom) == Some(literal.sign))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause { literals: iter.into_iter().collect() }
    }
}

impl IntoIterator for Clause {
    type Item = Literal;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.into_iter()
    }
}

impl Literal {
    /// Creates literal with given atom and polarity
    pub fn new(atom: Atom, sign: bool) -> Literal {
        Literal { atom, sign }
    }

    /// Creates a positive literal of the atom
    pub fn pos(atom: Atom) -> Literal {
        Literal { atom, sign: true }
    }

    /// Creates a negative literal of the atom
    pub fn neg(atom: Atom) -> Literal {
        Literal { atom, sign: false }
    }

    /// Reads a signed integer; the absolute value is the atom and
    /// the sign states the polarity. Zero is not a literal.
    pub fn from_signed(value: i64) -> Option<Literal> {
        if value == 0 {
            None
        } else {
            Some(Literal {
                atom: value.unsigned_abs() as Atom,
                sign: value > 0,
            })
        }
    }

    pub fn atom(&self) -> Atom {
        self.atom
    }

    /// Converts to signed integer.
    ///
    /// **NOTE** it is not integer-overflow friendly.
    pub fn to_signed(&self) -> i64 {
        if self.sign {
            self.atom as i64
        } else {
            -(self.atom as i64)
        }
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal { atom: self.atom, sign: !self.sign }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.clauses {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literals.iter().join(" "))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}
