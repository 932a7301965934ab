use maze::{decode, encode, find_path, Maze, Plan};
use proptest::prelude::*;
use solver::{check_model, DavisPutnam, ProblemFile, SolutionFile, Solver};

fn maze(text: &str) -> Maze {
    text.parse().unwrap()
}

fn path(nodes: &[&str]) -> Plan {
    Plan::Path(nodes.iter().map(|n| n.to_string()).collect())
}

#[test]
fn two_nodes_single_step() {
    let maze = maze("START B\n\n1\nSTART TREASURES NEXT B\nB TREASURES NEXT START\n");
    assert_eq!(find_path(&maze, &DavisPutnam).unwrap(), path(&["START", "B"]));
}

#[test]
fn two_nodes_one_edge() {
    let one_edge = maze("START B\n\n1\nSTART TREASURES NEXT B\n");
    let problem = encode(&one_edge).unwrap();
    let clauses: Vec<Vec<i64>> = problem
        .formula
        .clauses
        .iter()
        .map(|clause| clause.literals.iter().map(|literal| literal.to_signed()).collect())
        .collect();
    assert_eq!(clauses, vec![vec![-1, -2], vec![-3, -4], vec![-1, 4], vec![-2], vec![1]]);
    assert_eq!(find_path(&one_edge, &DavisPutnam).unwrap(), path(&["START", "B"]));

    // a description line without successors reads the same
    let empty_line = maze("START B\n\n1\nSTART TREASURES NEXT B\nB TREASURES NEXT\n");
    assert_eq!(encode(&empty_line).unwrap(), problem);
    assert_eq!(find_path(&empty_line, &DavisPutnam).unwrap(), path(&["START", "B"]));
}

#[test]
fn pipeline_through_text_files() {
    let maze = maze("START B\n\n1\nSTART TREASURES NEXT B\nB TREASURES NEXT START\n");

    let problem_text = encode(&maze).unwrap().to_string();
    let problem = ProblemFile::parse(&problem_text).unwrap();
    let instance = problem.instance().unwrap();
    let solution = DavisPutnam.solve(&instance);
    assert!(check_model(instance.formula(), solution.model().unwrap()));

    let solution_text = SolutionFile::new(solution, problem.symbols).to_string();
    assert!(solution_text.starts_with("SAT\n1 T\n2 F\n3 F\n4 T\n0\n1 At(START,0)\n"));

    let plan = decode(&SolutionFile::parse(&solution_text).unwrap());
    assert_eq!(plan.to_string(), "START B");
}

#[test]
fn collects_the_treasure() {
    let maze = maze(
        "START A B\nGOLD\n2\nSTART TREASURES NEXT A\nA TREASURES NEXT B\nB TREASURES GOLD NEXT B\n",
    );
    assert_eq!(find_path(&maze, &DavisPutnam).unwrap(), path(&["START", "A", "B"]));
}

#[test]
fn unreachable_treasure_has_no_solution() {
    let maze = maze(
        "START A B\nGOLD\n1\nSTART TREASURES NEXT A\nA TREASURES NEXT B\nB TREASURES GOLD NEXT B\n",
    );
    assert_eq!(find_path(&maze, &DavisPutnam).unwrap(), Plan::NoSolution);
}

#[test]
fn two_treasures_in_opposite_directions() {
    let maze = maze(concat!(
        "START L R\nRUBY PEARL\n3\n",
        "START TREASURES NEXT L R\n",
        "L TREASURES RUBY NEXT START\n",
        "R TREASURES PEARL NEXT START\n",
    ));
    let plan = find_path(&maze, &DavisPutnam).unwrap();
    let walk = plan.path().expect("both treasures are reachable in three steps");
    assert_eq!(walk.len(), 4);
    assert!(walk.contains(&"L".to_string()));
    assert!(walk.contains(&"R".to_string()));
}

/// START -> N1 -> ... -> Nk with the treasure at Nk, which loops onto itself
fn corridor(length: usize, steps: usize) -> String {
    let nodes: Vec<String> = (1..=length).map(|i| format!("N{}", i)).collect();
    let mut text = format!("START {}\nGOLD\n{}\nSTART TREASURES NEXT N1\n", nodes.join(" "), steps);
    for (i, node) in nodes.iter().enumerate() {
        if i + 1 < length {
            text.push_str(&format!("{} TREASURES NEXT {}\n", node, nodes[i + 1]));
        } else {
            text.push_str(&format!("{} TREASURES GOLD NEXT {}\n", node, node));
        }
    }
    text
}

proptest! {
    #[test]
    fn walks_follow_edges(length in 1..=4usize, slack in 0..=2usize) {
        let maze = maze(&corridor(length, length + slack));
        let plan = find_path(&maze, &DavisPutnam).unwrap();
        let walk = plan.path().unwrap();

        prop_assert_eq!(walk.len(), length + slack + 1);
        prop_assert_eq!(walk[0].as_str(), "START");
        for (from, to) in walk.iter().zip(walk.iter().skip(1)) {
            prop_assert!(maze.successors(from).contains(to));
        }
        let goal = format!("N{}", length);
        prop_assert_eq!(walk.last(), Some(&goal));
    }

    #[test]
    fn too_few_steps_fail(length in 2..=4usize) {
        let maze = maze(&corridor(length, length - 1));
        prop_assert_eq!(find_path(&maze, &DavisPutnam).unwrap(), Plan::NoSolution);
    }
}
