//! The treasure hunt on top of the solver: a maze is compiled to CNF
//! together with a symbol table, and a model is read back as a walk.

mod decoding;
mod encoding;
mod error;
mod maze;

pub use decoding::{decode, Plan};
pub use encoding::{encode, Key, Proposition};
pub use error::MazeError;
pub use maze::{Maze, START};

use solver::{SolutionFile, Solver};
use tracing::info;

/// Solve the puzzle
pub fn find_path(maze: &Maze, solver: &impl Solver) -> Result<Plan, MazeError> {
    let problem = encode(maze)?;
    let instance = problem.instance()?;
    let solution = solver.solve(&instance);
    info!(satisfiable = solution.is_sat(), "solved maze");
    Ok(decode(&SolutionFile::new(solution, problem.symbols)))
}
