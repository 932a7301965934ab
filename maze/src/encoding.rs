use indexmap::IndexSet;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use solver::{Atom, Clause, Formula, Literal, ProblemFile, Symbol, SymbolTable};

use crate::error::MazeError;
use crate::maze::{Maze, START};

/// What an atom of the encoding means
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Proposition {
    /// The player is at `node` at `time`
    At { node: String, time: usize },
    /// The player holds `treasure` at `time`
    Has { treasure: String, time: usize },
}

impl Proposition {
    pub fn symbol(&self) -> Symbol {
        match self {
            Proposition::At { node, time } => {
                Symbol::new("At", vec![node.clone(), time.to_string()])
            }
            Proposition::Has { treasure, time } => {
                Symbol::new("Has", vec![treasure.clone(), time.to_string()])
            }
        }
    }
}

/// Numbering of the propositions: all `At` atoms time by time, then all
/// `Has` atoms time by time. Atom `n` is the proposition at index `n - 1`.
pub struct Key {
    propositions: IndexSet<Proposition>,
}

impl Key {
    pub fn new(maze: &Maze) -> Key {
        let times = 0..=maze.steps;
        let at = times.clone().flat_map(|time| {
            maze.nodes.iter().map(move |node| Proposition::At { node: node.clone(), time })
        });
        let has = times.flat_map(|time| {
            maze.treasures
                .iter()
                .map(move |treasure| Proposition::Has { treasure: treasure.clone(), time })
        });
        Key { propositions: at.chain(has).collect() }
    }

    fn atom(&self, proposition: Proposition) -> Result<Atom, MazeError> {
        match self.propositions.get_index_of(&proposition) {
            Some(index) => Ok(index + 1),
            None => Err(MazeError::Unnumbered(proposition.symbol().to_string())),
        }
    }

    pub fn at(&self, node: &str, time: usize) -> Result<Atom, MazeError> {
        self.atom(Proposition::At { node: node.to_string(), time })
    }

    pub fn has(&self, treasure: &str, time: usize) -> Result<Atom, MazeError> {
        self.atom(Proposition::Has { treasure: treasure.to_string(), time })
    }

    pub fn len(&self) -> usize {
        self.propositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propositions.is_empty()
    }

    pub fn symbols(&self) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (index, proposition) in self.propositions.iter().enumerate() {
            table.insert(index + 1, proposition.symbol());
        }
        table
    }
}

type Constraints = Result<Formula, MazeError>;

/// Compiles the maze to clauses and the table explaining their atoms
pub fn encode(maze: &Maze) -> Result<ProblemFile, MazeError> {
    let key = Key::new(maze);

    let ((one_place, moves), ((pickups, retention), (acquisition, boundary))) = rayon::join(
        || {
            rayon::join(
                || make_one_place_constraints(maze, &key),
                || make_move_constraints(maze, &key),
            )
        },
        || {
            rayon::join(
                || {
                    rayon::join(
                        || make_pickup_constraints(maze, &key),
                        || make_retention_constraints(maze, &key),
                    )
                },
                || {
                    rayon::join(
                        || make_acquisition_constraints(maze, &key),
                        || make_boundary_constraints(maze, &key),
                    )
                },
            )
        },
    );

    let mut clauses: IndexSet<Clause> = IndexSet::new();
    for part in vec![one_place?, moves?, pickups?, retention?, acquisition?, boundary?] {
        clauses.extend(part);
    }

    debug!(
        nodes = maze.nodes.len(),
        treasures = maze.treasures.len(),
        steps = maze.steps,
        atoms = key.len(),
        clauses = clauses.len(),
        "encoded maze"
    );

    Ok(ProblemFile::new(clauses.into_iter().collect(), key.symbols()))
}

/// The player is at no two places at once: ¬At(M,T) ∨ ¬At(N,T)
fn make_one_place_constraints(maze: &Maze, key: &Key) -> Constraints {
    (0..=maze.steps)
        .into_par_iter()
        .flat_map_iter(move |time| {
            maze.nodes.iter().tuple_combinations().map(move |(m, n)| -> Result<Clause, MazeError> {
                Ok(vec![Literal::neg(key.at(m, time)?), Literal::neg(key.at(n, time)?)]
                    .into_iter()
                    .collect())
            })
        })
        .collect()
}

/// The player moves along edges: ¬At(N,T) ∨ At(M1,T+1) ∨ ... ∨ At(Mk,T+1)
fn make_move_constraints(maze: &Maze, key: &Key) -> Constraints {
    (0..maze.steps)
        .into_par_iter()
        .flat_map_iter(move |time| {
            maze.nodes.iter().map(move |node| -> Result<Clause, MazeError> {
                let mut literals = vec![Literal::neg(key.at(node, time)?)];
                for next in maze.successors(node) {
                    literals.push(Literal::pos(key.at(next, time + 1)?));
                }
                Ok(literals.into_iter().sorted_by_key(Literal::to_signed).collect())
            })
        })
        .collect()
}

/// Standing on a treasure means holding it: ¬At(N,T) ∨ Has(X,T)
fn make_pickup_constraints(maze: &Maze, key: &Key) -> Constraints {
    (0..=maze.steps)
        .into_par_iter()
        .flat_map_iter(move |time| {
            maze.treasure_map.iter().flat_map(move |(node, gems)| {
                gems.iter().map(move |gem| -> Result<Clause, MazeError> {
                    Ok(vec![Literal::neg(key.at(node, time)?), Literal::pos(key.has(gem, time)?)]
                        .into_iter()
                        .collect())
                })
            })
        })
        .collect()
}

/// Treasures are never lost: ¬Has(X,T-1) ∨ Has(X,T)
fn make_retention_constraints(maze: &Maze, key: &Key) -> Constraints {
    (1..=maze.steps)
        .into_par_iter()
        .flat_map_iter(move |time| {
            maze.treasures.iter().map(move |gem| -> Result<Clause, MazeError> {
                Ok(vec![Literal::neg(key.has(gem, time - 1)?), Literal::pos(key.has(gem, time)?)]
                    .into_iter()
                    .collect())
            })
        })
        .collect()
}

/// A treasure is only acquired where it lies:
/// Has(X,T-1) ∨ ¬Has(X,T) ∨ At(M1,T) ∨ ... ∨ At(Mq,T)
fn make_acquisition_constraints(maze: &Maze, key: &Key) -> Constraints {
    (1..=maze.steps)
        .into_par_iter()
        .flat_map_iter(move |time| {
            maze.treasures.iter().map(move |gem| -> Result<Clause, MazeError> {
                let mut literals =
                    vec![Literal::pos(key.has(gem, time - 1)?), Literal::neg(key.has(gem, time)?)];
                for node in maze.locations_of(gem) {
                    literals.push(Literal::pos(key.at(node, time)?));
                }
                Ok(literals.into_iter().collect())
            })
        })
        .collect()
}

/// Start at START with empty hands, end holding everything
fn make_boundary_constraints(maze: &Maze, key: &Key) -> Constraints {
    let mut formula = Formula::single(Clause::single(Literal::pos(key.at(START, 0)?)));
    for gem in &maze.treasures {
        formula.push(Clause::single(Literal::neg(key.has(gem, 0)?)));
    }
    for gem in &maze.treasures {
        formula.push(Clause::single(Literal::pos(key.has(gem, maze.steps)?)));
    }
    Ok(formula)
}
