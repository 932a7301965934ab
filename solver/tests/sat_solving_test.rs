use proptest::{bool::weighted, collection::vec, prelude::*};
use solver::{
    check_model, Bruteforce, Clause, DavisPutnam, Formula, Instance, Literal, Model, SATSolution,
    Solver, Universe,
};

const MAX_NUM_ATOMS: usize = 6;
const MAX_NUM_LITERALS: usize = 4;
const MAX_NUM_CLAUSES: usize = 12;

fn to_formula(clauses: &[Vec<(usize, bool)>]) -> Formula {
    clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .map(|(atom, sign)| Literal::new(*atom, *sign))
                .collect::<Clause>()
        })
        .collect()
}

fn execute_solvers(formula: Formula, num_atoms: usize) -> (SATSolution, SATSolution) {
    let instance = Instance::new((1..=num_atoms).collect::<Universe>(), formula).unwrap();
    let testing_solution = DavisPutnam.solve(&instance);
    let reference_solution = Bruteforce::Bruteforce.solve(&instance);
    (testing_solution, reference_solution)
}

fn instance(universe: Vec<usize>, clauses: Vec<Vec<i64>>) -> Instance {
    Instance::new(universe.into_iter().collect(), Formula::from_signed(clauses).unwrap()).unwrap()
}

fn model(values: Vec<(usize, bool)>) -> Model {
    values.into_iter().collect()
}

#[test]
fn forced_chain_of_units() {
    let solution = DavisPutnam.solve(&instance(vec![1, 2], vec![vec![1, 2], vec![-1]]));
    assert_eq!(solution, SATSolution::Satisfiable(model(vec![(1, false), (2, true)])));
}

#[test]
fn unit_against_its_negation() {
    let solution = DavisPutnam.solve(&instance(vec![1], vec![vec![1], vec![-1]]));
    assert_eq!(solution, SATSolution::Unsatisfiable);
}

#[test]
fn pure_literal_satisfies_most_clauses() {
    let clauses = vec![vec![1, 2], vec![1, 3], vec![-2, -3]];
    let solution = DavisPutnam.solve(&instance(vec![1, 2, 3], clauses.clone()));
    let found = solution.model().expect("formula is satisfiable");
    assert_eq!(found.get(&1), Some(&true));
    assert!(check_model(&Formula::from_signed(clauses).unwrap(), found));
}

#[test]
fn empty_formula_is_satisfied_by_true() {
    let solution = DavisPutnam.solve(&instance(vec![1], vec![]));
    assert_eq!(solution, SATSolution::Satisfiable(model(vec![(1, true)])));
}

#[test]
fn pigeonhole_three_into_two() {
    // p(i, h) = 2 * i + h + 1: pigeon i sits in hole h
    let p = |i: i64, h: i64| 2 * i + h + 1;
    let mut clauses: Vec<Vec<i64>> = (0..3).map(|i| vec![p(i, 0), p(i, 1)]).collect();
    for h in 0..2 {
        for i in 0..3 {
            for j in i + 1..3 {
                clauses.push(vec![-p(i, h), -p(j, h)]);
            }
        }
    }
    let instance = Instance::from_formula(Formula::from_signed(clauses).unwrap()).unwrap();
    assert_eq!(DavisPutnam.solve(&instance), SATSolution::Unsatisfiable);
}

#[test]
fn model_covers_the_whole_universe() {
    let instance = instance(vec![10, 20, 30, 40], vec![vec![20, -30], vec![-20]]);
    let found = DavisPutnam.solve(&instance).into_model().unwrap();
    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30, 40]);
    assert_eq!(found[&20], false);
    assert_eq!(found[&30], false);
}

proptest! {
    #[test]
    fn only_unit_clauses(signs in vec(weighted(0.5), 1..=MAX_NUM_ATOMS)) {
        let num_atoms = signs.len();
        let clauses: Vec<Vec<(usize, bool)>> = signs.iter()
            .enumerate()
            .map(|(atom, sign)| vec![(atom + 1, *sign)])
            .collect();

        let (custom, reference) = execute_solvers(to_formula(&clauses), num_atoms);
        prop_assert_eq!(custom, reference);
    }

    #[test]
    fn agrees_with_truth_table(
        clauses in vec(
            vec((1..=MAX_NUM_ATOMS, weighted(0.5)), 0..=MAX_NUM_LITERALS),
            0..=MAX_NUM_CLAUSES,
        )
    ) {
        let formula = to_formula(&clauses);
        let (custom, reference) = execute_solvers(formula.clone(), MAX_NUM_ATOMS);

        prop_assert_eq!(custom.is_sat(), reference.is_sat());
        if let Some(found) = custom.model() {
            prop_assert!(check_model(&formula, found));
            prop_assert_eq!(found.len(), MAX_NUM_ATOMS);
        }
    }

    #[test]
    fn agrees_with_truth_table_on_ten_atoms(
        clauses in vec(vec((1..=10usize, weighted(0.5)), 1..=3), 20..=45)
    ) {
        let formula = to_formula(&clauses);
        let (custom, reference) = execute_solvers(formula.clone(), 10);

        prop_assert_eq!(custom.is_sat(), reference.is_sat());
        if let Some(found) = custom.model() {
            prop_assert!(check_model(&formula, found));
        }
    }

    #[test]
    fn answer_does_not_depend_on_unused_atoms(
        clauses in vec(vec((1..=4usize, weighted(0.5)), 1..=3), 1..=8)
    ) {
        let formula = to_formula(&clauses);
        let small = DavisPutnam.solve(&Instance::new((1..=4).collect(), formula.clone()).unwrap());
        let large = DavisPutnam.solve(&Instance::new((1..=8).collect(), formula).unwrap());
        prop_assert_eq!(small.is_sat(), large.is_sat());
    }
}
