use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use tracing::debug;

use solver::SolutionFile;

/// Where the player is at each step, or that no walk exists
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    Path(Vec<String>),
    NoSolution,
}

impl Plan {
    pub fn path(&self) -> Option<&[String]> {
        match self {
            Plan::Path(path) => Some(path),
            Plan::NoSolution => None,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Path(path) => write!(f, "{}", path.iter().join(" ")),
            Plan::NoSolution => write!(f, "NO SOLUTION"),
        }
    }
}

/// Reads the positions off the `At(node,time)` atoms assigned true
pub fn decode(solution: &SolutionFile) -> Plan {
    let positions: BTreeMap<usize, &str> = solution
        .true_symbols()
        .filter(|symbol| symbol.name == "At")
        .filter_map(|symbol| match symbol.args.as_slice() {
            [node, time] => time.parse::<usize>().ok().map(|time| (time, node.as_str())),
            _ => None,
        })
        .collect();

    debug!(steps = positions.len(), "decoded positions");

    if positions.is_empty() {
        Plan::NoSolution
    } else {
        Plan::Path(positions.into_iter().map(|(_, node)| node.to_string()).collect())
    }
}
