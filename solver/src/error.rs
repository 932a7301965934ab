use thiserror::Error;

use crate::cnf::Atom;

/// Rejections of an instance before the search starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Atoms are positive integers
    #[error("atom 0 is not a valid atom")]
    ZeroAtom,

    /// A clause references an atom missing from the declared universe
    #[error("clause {clause} references atom {atom} which is not in the universe")]
    UnknownAtom { atom: Atom, clause: usize },

    /// There is nothing a non-empty formula could talk about
    #[error("the universe is empty but the formula has {clauses} clause(s)")]
    EmptyUniverse { clauses: usize },
}

/// Errors raised while reading the textual exchange format or DIMACS
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: `{token}` is not a nonzero integer literal")]
    InvalidLiteral { line: usize, token: String },

    #[error("line {line}: literal 0 inside a clause")]
    ZeroLiteral { line: usize },

    #[error("the clause section is not terminated by a `0` line")]
    MissingSentinel,

    #[error("line {line}: malformed symbol entry `{content}`")]
    InvalidSymbol { line: usize, content: String },

    #[error("line {line}: atom {atom} already has a symbol")]
    DuplicateSymbol { line: usize, atom: Atom },

    #[error("line {line}: expected `SAT` or `UNSAT`, found `{content}`")]
    MissingVerdict { line: usize, content: String },

    #[error("line {line}: malformed valuation entry `{content}`")]
    InvalidValuation { line: usize, content: String },

    #[error("DIMACS parse error: {0}")]
    Dimacs(String),

    #[error("only CNF instances are supported")]
    NotCnf,

    #[error(transparent)]
    Input(#[from] InputError),
}
