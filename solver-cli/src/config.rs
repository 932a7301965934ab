use std::path::PathBuf;

use solver::Solver;

/// What the invocation should do
pub enum Command {
    /// Maze description to problem file
    Encode {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    /// Problem file (or DIMACS) to solution file (or DIMACS answer)
    Solve {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        dimacs: bool,
    },
    /// Solution file to a walk through the maze
    Decode {
        input: Option<PathBuf>,
    },
    /// All three stages; intermediate files are kept when paths are given
    Run {
        input: Option<PathBuf>,
        problem: Option<PathBuf>,
        solution: Option<PathBuf>,
    },
}

pub struct Config {
    pub command:     Command,
    pub solver:      Box<dyn Solver>,
    pub return_code: bool,
    pub verbose:     bool,
}
