//! The line based text format passed between the encoder, the solver and
//! the decoder.
//!
//! A problem file holds one clause per line as signed integers, a line with
//! a single `0`, and then the symbol table, one `<atom> <Name>(<args>)` per
//! line. A solution file starts with `SAT` or `UNSAT`; after `SAT` comes
//! `<atom> T` or `<atom> F` for each atom of the model. The same `0` line and
//! symbol table follow.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::cnf::{Atom, Clause, Formula, Literal};
use crate::error::{FormatError, InputError};
use crate::{Instance, Model, SATSolution};

const SENTINEL: &str = "0";
const SATISFIABLE: &str = "SAT";
const UNSATISFIABLE: &str = "UNSAT";

/// Meaning of an atom, e.g. `At(START,0)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub args: Vec<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl ToString>) -> Symbol {
        Symbol {
            name: name.into(),
            args: args.into_iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.iter().join(","))
    }
}

impl FromStr for Symbol {
    type Err = ();

    fn from_str(s: &str) -> Result<Symbol, ()> {
        let open = s.find('(').ok_or(())?;
        if !s.ends_with(')') || open == 0 {
            return Err(());
        }
        let name = &s[..open];
        let inner = &s[open + 1..s.len() - 1];
        let bad_name = name.contains(|c: char| c.is_whitespace() || c == ')');
        if bad_name || inner.contains(|c: char| c == '(' || c == ')') {
            return Err(());
        }
        let args = if inner.is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(String::from).collect()
        };
        Ok(Symbol { name: name.to_string(), args })
    }
}

/// Atom numbers and what they stand for, in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: IndexMap<Atom, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Returns the previous symbol of the atom, if there was one
    pub fn insert(&mut self, atom: Atom, symbol: Symbol) -> Option<Symbol> {
        self.entries.insert(atom, symbol)
    }

    pub fn get(&self, atom: Atom) -> Option<&Symbol> {
        self.entries.get(&atom)
    }

    /// Atom number of a symbol
    pub fn atom_of(&self, symbol: &Symbol) -> Option<Atom> {
        self.entries.iter().find(|(_, s)| *s == symbol).map(|(atom, _)| *atom)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, &Symbol)> + '_ {
        self.entries.iter().map(|(atom, symbol)| (*atom, symbol))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn parse_lines<'a>(
        lines: impl Iterator<Item = (usize, &'a str)>,
    ) -> Result<SymbolTable, FormatError> {
        let mut table = SymbolTable::new();
        for (line, content) in lines {
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let invalid = || FormatError::InvalidSymbol { line, content: content.to_string() };
            let (atom, symbol) = content.split_once(char::is_whitespace).ok_or_else(invalid)?;
            let atom: Atom = atom.parse().map_err(|_| invalid())?;
            let symbol: Symbol = symbol.trim().parse().map_err(|_| invalid())?;
            if atom == 0 {
                return Err(invalid());
            }
            if table.insert(atom, symbol).is_some() {
                return Err(FormatError::DuplicateSymbol { line, atom });
            }
        }
        Ok(table)
    }

    fn write_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (atom, symbol) in self.iter() {
            writeln!(f, "{} {}", atom, symbol)?;
        }
        Ok(())
    }
}

/// Numbered lines before the sentinel line, and those after it
fn split_at_sentinel(input: &str) -> Result<(Vec<(usize, &str)>, Vec<(usize, &str)>), FormatError> {
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut head = Vec::new();
    for (line, content) in lines.by_ref() {
        if content.trim() == SENTINEL {
            return Ok((head, lines.collect()));
        }
        head.push((line, content));
    }
    Err(FormatError::MissingSentinel)
}

/// Encoder output and solver input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemFile {
    pub formula: Formula,
    pub symbols: SymbolTable,
}

impl ProblemFile {
    pub fn new(formula: Formula, symbols: SymbolTable) -> ProblemFile {
        ProblemFile { formula, symbols }
    }

    /// A blank line in the clause section is an empty clause
    pub fn parse(input: &str) -> Result<ProblemFile, FormatError> {
        let (clause_lines, symbol_lines) = split_at_sentinel(input)?;

        let formula = clause_lines
            .into_iter()
            .map(|(line, content)| parse_clause(line, content))
            .collect::<Result<Formula, FormatError>>()?;
        let symbols = SymbolTable::parse_lines(symbol_lines.into_iter())?;

        Ok(ProblemFile { formula, symbols })
    }

    /// The instance over the atoms of the clauses, in order of first appearance
    pub fn instance(&self) -> Result<Instance, InputError> {
        Instance::from_formula(self.formula.clone())
    }
}

fn parse_clause(line: usize, content: &str) -> Result<Clause, FormatError> {
    content
        .split_whitespace()
        .map(|token| {
            let value: i64 = token
                .parse()
                .map_err(|_| FormatError::InvalidLiteral { line, token: token.to_string() })?;
            Literal::from_signed(value).ok_or(FormatError::ZeroLiteral { line })
        })
        .collect()
}

impl fmt::Display for ProblemFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.formula.clauses {
            writeln!(f, "{}", clause)?;
        }
        writeln!(f, "{}", SENTINEL)?;
        self.symbols.write_lines(f)
    }
}

/// Solver output and decoder input. `model` is `None` when no model exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionFile {
    pub model: Option<Model>,
    pub symbols: SymbolTable,
}

impl SolutionFile {
    pub fn new(solution: SATSolution, symbols: SymbolTable) -> SolutionFile {
        SolutionFile { model: solution.into_model(), symbols }
    }

    pub fn parse(input: &str) -> Result<SolutionFile, FormatError> {
        let (valuation_lines, symbol_lines) = split_at_sentinel(input)?;
        let mut entries = valuation_lines
            .into_iter()
            .map(|(line, content)| (line, content.trim()))
            .filter(|(_, content)| !content.is_empty());

        let mut model = match entries.next() {
            Some((_, SATISFIABLE)) => Some(Model::new()),
            Some((_, UNSATISFIABLE)) => None,
            Some((line, content)) => {
                return Err(FormatError::MissingVerdict { line, content: content.to_string() })
            }
            None => return Err(FormatError::MissingVerdict { line: 1, content: String::new() }),
        };

        for (line, content) in entries {
            let invalid = || FormatError::InvalidValuation { line, content: content.to_string() };
            // an unsatisfiable answer carries no valuation
            let model = model.as_mut().ok_or_else(invalid)?;
            let (atom, value) = content
                .split_whitespace()
                .collect_tuple::<(&str, &str)>()
                .ok_or_else(invalid)?;
            let atom: Atom = atom.parse().map_err(|_| invalid())?;
            let value = match value {
                "T" => true,
                "F" => false,
                _ => return Err(invalid()),
            };
            model.insert(atom, value);
        }
        let symbols = SymbolTable::parse_lines(symbol_lines.into_iter())?;

        Ok(SolutionFile { model, symbols })
    }

    /// Symbols of the atoms assigned true, in valuation order
    pub fn true_symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.model
            .iter()
            .flat_map(|model| model.iter())
            .filter(|(_, value)| **value)
            .filter_map(move |(atom, _)| self.symbols.get(*atom))
    }
}

impl fmt::Display for SolutionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.model {
            Some(model) => {
                writeln!(f, "{}", SATISFIABLE)?;
                for (atom, value) in model {
                    writeln!(f, "{} {}", atom, if *value { 'T' } else { 'F' })?;
                }
            }
            None => writeln!(f, "{}", UNSATISFIABLE)?,
        }
        writeln!(f, "{}", SENTINEL)?;
        self.symbols.write_lines(f)
    }
}
