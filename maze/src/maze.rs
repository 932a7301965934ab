use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};

use crate::error::MazeError;

/// Name of the node the player starts in
pub const START: &str = "START";

const TREASURES_KEYWORD: &str = "TREASURES";
const NEXT_KEYWORD: &str = "NEXT";

/// A directed graph of nodes, some of them holding treasures, and a bound
/// on the number of steps the player may take.
///
/// The text form is
///
/// ```text
/// START A B          <- nodes
/// GOLD               <- treasures, may be empty
/// 2                  <- step bound
/// START TREASURES NEXT A
/// A TREASURES GOLD NEXT START B
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub nodes: IndexSet<String>,
    pub treasures: IndexSet<String>,
    pub steps: usize,
    /// Treasures lying at each node, for nodes with any
    pub treasure_map: IndexMap<String, Vec<String>>,
    /// Successors of each node, for nodes that have a description line
    pub neighbours: IndexMap<String, Vec<String>>,
}

impl Maze {
    /// Successors of the node; nodes without a description line have none
    pub fn successors(&self, node: &str) -> &[String] {
        self.neighbours.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes at which the treasure lies
    pub fn locations_of<'a>(&'a self, treasure: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.treasure_map
            .iter()
            .filter(move |(_, gems)| gems.iter().any(|gem| gem == treasure))
            .map(|(node, _)| node)
    }
}

fn names(line: usize, content: &str) -> Result<IndexSet<String>, MazeError> {
    let mut out = IndexSet::new();
    for name in content.split_whitespace() {
        if !out.insert(name.to_string()) {
            return Err(MazeError::Duplicate { line, name: name.to_string() });
        }
    }
    Ok(out)
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(input: &str) -> Result<Maze, MazeError> {
        let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l));
        let mut header = |n: usize| lines.next().map(|(_, l)| l).ok_or(MazeError::MissingHeader(n));

        let nodes = names(1, header(1)?)?;
        let treasures = names(2, header(2)?)?;
        let bound = header(3)?.trim();
        let steps = bound.parse().map_err(|_| MazeError::InvalidStepBound(bound.to_string()))?;

        if !nodes.contains(START) {
            return Err(MazeError::MissingStart);
        }

        let mut treasure_map: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut neighbours: IndexMap<String, Vec<String>> = IndexMap::new();

        for (line, content) in lines {
            let mut tokens = content.split_whitespace();
            let node = match tokens.next() {
                Some(node) => node.to_string(),
                None => continue,
            };
            if !nodes.contains(&node) {
                return Err(MazeError::UnknownNode { line, node });
            }
            if neighbours.contains_key(&node) {
                return Err(MazeError::Duplicate { line, name: node });
            }
            if tokens.next() != Some(TREASURES_KEYWORD) {
                return Err(MazeError::MissingKeyword { line, keyword: TREASURES_KEYWORD });
            }

            let mut gems = Vec::new();
            let mut found_next = false;
            for token in tokens.by_ref() {
                if token == NEXT_KEYWORD {
                    found_next = true;
                    break;
                }
                if !treasures.contains(token) {
                    return Err(MazeError::UnknownTreasure { line, treasure: token.to_string() });
                }
                gems.push(token.to_string());
            }
            if !found_next {
                return Err(MazeError::MissingKeyword { line, keyword: NEXT_KEYWORD });
            }

            let successors = tokens
                .map(|next| {
                    if nodes.contains(next) {
                        Ok(next.to_string())
                    } else {
                        Err(MazeError::UnknownNode { line, node: next.to_string() })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            if !gems.is_empty() {
                treasure_map.insert(node.clone(), gems);
            }
            neighbours.insert(node, successors);
        }

        Ok(Maze { nodes, treasures, steps, treasure_map, neighbours })
    }
}
