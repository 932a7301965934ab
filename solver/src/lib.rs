//! Satisfiability of propositional formulae in conjunctive normal form,
//! decided with the Davis-Putnam procedure.

/// The CNF representation of a formula
pub mod cnf;
/// Formulae checked against the universe of atoms they are solved over
pub mod instance;
/// Partial truth assignments built up during the search
pub mod valuation;
/// The Solver trait which has to be implemented by each solver
pub mod sat_solver;
/// Module that specifies the output of a solver
mod sat_solution;
/// The Davis-Putnam solver
pub mod dpll;
pub mod bruteforce;
mod timed_solver;
/// Text format exchanged between encoder, solver and decoder
pub mod exchange;
pub mod error;

pub use bruteforce::Bruteforce;
pub use cnf::{Atom, Clause, Formula, Literal};
pub use dpll::{DavisPutnam, SearchStats};
pub use error::{FormatError, InputError};
pub use exchange::{ProblemFile, SolutionFile, Symbol, SymbolTable};
pub use instance::{Instance, Universe};
pub use sat_solution::{Model, SATSolution};
pub use sat_solver::{check_model, Solver};
pub use timed_solver::TimedSolver;
pub use valuation::Valuation;
