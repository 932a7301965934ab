use indexmap::IndexMap;
use itertools::Itertools;

use crate::cnf::{Atom, Literal};
use crate::instance::Universe;

/// A total valuation: every atom of the universe, in universe order,
/// mapped to its truth value
pub type Model = IndexMap<Atom, bool>;

const MAX_LITERALS_PER_LINE: usize = 8;

/// Outcome of a solver. Being unsatisfiable is an ordinary answer.
#[derive(Clone, PartialEq, Eq)]
pub enum SATSolution {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SATSolution {
    /// Pairs the values computed per universe position with their atoms
    pub fn from_values(universe: &Universe, values: Vec<bool>) -> SATSolution {
        SATSolution::Satisfiable(universe.iter().zip(values).collect())
    }

    pub fn is_sat(&self) -> bool {
        matches!(self, SATSolution::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SATSolution::Satisfiable(model) => Some(model),
            SATSolution::Unsatisfiable => None,
        }
    }

    pub fn into_model(self) -> Option<Model> {
        match self {
            SATSolution::Satisfiable(model) => Some(model),
            SATSolution::Unsatisfiable => None,
        }
    }

    /// Output in the format of the SAT competition
    pub fn to_dimacs(&self) -> String {
        match self {
            SATSolution::Unsatisfiable => "s UNSATISFIABLE\n".to_string(),
            SATSolution::Satisfiable(model) => {
                let mut out = String::from("s SATISFIABLE\n");
                for chunk in &model.iter().chunks(MAX_LITERALS_PER_LINE) {
                    let literals = chunk.map(|(atom, value)| Literal::new(*atom, *value)).join(" ");
                    out.push_str(&format!("v {} 0\n", literals));
                }
                if model.is_empty() {
                    out.push_str("v 0\n");
                }
                out
            }
        }
    }
}

impl std::fmt::Debug for SATSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl std::fmt::Display for SATSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SATSolution::Unsatisfiable => writeln!(f, "Unsatisfiable"),
            SATSolution::Satisfiable(model) => {
                writeln!(f, "Satisfiable:")?;
                for (atom, value) in model {
                    writeln!(f, "{} {}", atom, if *value { 'T' } else { 'F' })?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_output_wraps_lines() {
        let universe: Universe = (1..=10).collect();
        let values = (1..=10).map(|atom| atom % 2 == 0).collect();
        let solution = SATSolution::from_values(&universe, values);
        assert_eq!(
            solution.to_dimacs(),
            "s SATISFIABLE\nv -1 2 -3 4 -5 6 -7 8 0\nv -9 10 0\n"
        );
    }

    #[test]
    fn unsatisfiable_has_no_model() {
        assert_eq!(SATSolution::Unsatisfiable.to_dimacs(), "s UNSATISFIABLE\n");
        assert!(SATSolution::Unsatisfiable.model().is_none());
    }
}
