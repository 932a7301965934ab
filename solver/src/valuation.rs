/// A truth assignment over the universe, indexed by the position of
/// each atom in the universe. `None` means unassigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valuation {
    values: Vec<Option<bool>>,
}

impl Valuation {
    /// Every atom starts unassigned
    pub fn new(num_atoms: usize) -> Valuation {
        Valuation { values: vec![None; num_atoms] }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.values.get(index).copied().flatten()
    }

    pub fn is_assigned(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn assign(&mut self, index: usize, value: bool) {
        self.values[index] = Some(value);
    }

    /// Only used when the search rolls back to a branch point
    pub(crate) fn unassign(&mut self, index: usize) {
        self.values[index] = None;
    }

    /// First unassigned atom in universe order
    pub fn first_unassigned(&self) -> Option<usize> {
        self.values.iter().position(Option::is_none)
    }

    pub fn num_assigned(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Turns the valuation into a total one; atoms nobody cared about
    /// become true
    pub fn complete(self) -> Vec<bool> {
        self.values.into_iter().map(|v| v.unwrap_or(true)).collect()
    }
}
