//! The two easy cases of the Davis-Putnam procedure. Each function performs
//! at most one step; the search engine calls them until neither applies.

use super::formula_store::{FormulaStore, Lit};
use super::trail::Trail;
use crate::valuation::Valuation;

const POSITIVE: u8 = 0b01;
const NEGATIVE: u8 = 0b10;

/// First atom in universe order that occurs in the formula with only
/// one polarity, as the literal of that polarity
pub fn find_pure_literal(store: &FormulaStore, num_atoms: usize) -> Option<Lit> {
    let mut polarities = vec![0u8; num_atoms];
    for (_, literals) in store.clauses() {
        for literal in literals {
            polarities[literal.var] |= if literal.sign { POSITIVE } else { NEGATIVE };
        }
    }

    polarities
        .iter()
        .enumerate()
        .find_map(|(var, polarity)| match *polarity {
            POSITIVE => Some(Lit::new(var, true)),
            NEGATIVE => Some(Lit::new(var, false)),
            _ => None,
        })
}

/// Sole literal of the first clause of length one
pub fn find_unit_literal(store: &FormulaStore) -> Option<Lit> {
    store.clauses().find_map(|(_, literals)| match literals {
        [literal] => Some(*literal),
        _ => None,
    })
}

/// Makes the first pure literal true and drops the clauses it satisfies
pub fn eliminate_pure_literal(
    store: &mut FormulaStore,
    valuation: &mut Valuation,
    trail: &mut Trail,
) -> Option<Lit> {
    let literal = find_pure_literal(store, valuation.len())?;
    trail.bind(valuation, literal);
    store.delete_clauses_containing(literal, trail);
    Some(literal)
}

/// Makes the literal of the first unit clause true and propagates it.
/// A clause emptied on the way is left for the next terminal check.
pub fn propagate_unit_clause(
    store: &mut FormulaStore,
    valuation: &mut Valuation,
    trail: &mut Trail,
) -> Option<Lit> {
    let literal = find_unit_literal(store)?;
    trail.bind(valuation, literal);
    store.propagate(literal, trail);
    Some(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Formula, Instance};

    struct Fixture {
        store: FormulaStore,
        valuation: Valuation,
        trail: Trail,
    }

    fn fixture(clauses: Vec<Vec<i64>>) -> Fixture {
        let instance = Instance::from_formula(Formula::from_signed(clauses).unwrap()).unwrap();
        Fixture {
            store: FormulaStore::new(&instance),
            valuation: Valuation::new(instance.num_atoms()),
            trail: Trail::new(),
        }
    }

    #[test]
    fn pure_literal_is_first_in_universe_order() {
        // universe order: 1, 2, 3
        let f = fixture(vec![vec![1, -2], vec![-1, 3], vec![-2, -3]]);
        assert_eq!(find_pure_literal(&f.store, 3), Some(Lit::new(1, false)));
    }

    #[test]
    fn no_pure_literal_when_both_polarities_occur() {
        let f = fixture(vec![vec![1, -2], vec![-1, 2]]);
        assert_eq!(find_pure_literal(&f.store, 2), None);
    }

    #[test]
    fn pure_literal_elimination_satisfies_clauses() {
        let mut f = fixture(vec![vec![1, 2], vec![1, 3], vec![-2, -3]]);
        let literal = eliminate_pure_literal(&mut f.store, &mut f.valuation, &mut f.trail);
        assert_eq!(literal, Some(Lit::new(0, true)));
        assert_eq!(f.valuation.get(0), Some(true));
        assert_eq!(f.store.num_clauses(), 1);
    }

    #[test]
    fn unit_clause_is_first_by_index() {
        let f = fixture(vec![vec![1, 2], vec![-2], vec![1]]);
        assert_eq!(find_unit_literal(&f.store), Some(Lit::new(1, false)));
    }

    #[test]
    fn duplicated_literal_is_not_a_unit() {
        let f = fixture(vec![vec![1, 1]]);
        assert_eq!(find_unit_literal(&f.store), None);
    }

    #[test]
    fn unit_propagation_shrinks_other_clauses() {
        let mut f = fixture(vec![vec![1, 2], vec![-1]]);
        let literal = propagate_unit_clause(&mut f.store, &mut f.valuation, &mut f.trail);
        assert_eq!(literal, Some(Lit::new(0, false)));
        assert_eq!(f.valuation.get(0), Some(false));
        assert_eq!(find_unit_literal(&f.store), Some(Lit::new(1, true)));
    }

    #[test]
    fn unit_propagation_may_leave_empty_clause() {
        let mut f = fixture(vec![vec![1], vec![-1]]);
        propagate_unit_clause(&mut f.store, &mut f.valuation, &mut f.trail);
        assert!(f.store.has_empty_clause());
    }

    #[test]
    fn simplification_is_idle_without_easy_cases() {
        let mut f = fixture(vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]]);
        let before = f.store.clone();
        assert_eq!(eliminate_pure_literal(&mut f.store, &mut f.valuation, &mut f.trail), None);
        assert_eq!(propagate_unit_clause(&mut f.store, &mut f.valuation, &mut f.trail), None);
        assert_eq!(f.store, before);
        assert!(f.trail.is_empty());
    }
}
