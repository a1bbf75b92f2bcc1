use crate::formula::{Formula, Literal, Variable};
use log::trace;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Value given to variables the search never had to decide.
pub const DEFAULT_VALUE: bool = true;

/// A partial map from variables to values.
///
/// Every write is logged on a trail together with the value it replaced, so the
/// search can roll back to a [`TrailMark`] when a branch fails instead of relying
/// on later writes overwriting earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
    trail: Vec<(Variable, Option<bool>)>,
}

/// A position in the assignment's trail.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TrailMark(usize);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    /// Value of `literal` under this assignment, if its variable is assigned.
    pub fn value_of(&self, literal: &Literal) -> Option<bool> {
        self.get(literal.variable()).map(|v| literal.holds_under(v))
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.values.contains_key(&variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values.iter().map(|(v, b)| (*v, *b))
    }

    pub fn assign(&mut self, variable: Variable, value: bool) {
        let previous = self.values.insert(variable, value);
        self.trail.push((variable, previous));
    }

    pub fn mark(&self) -> TrailMark {
        TrailMark(self.trail.len())
    }

    /// Reverts every write made after `mark`, newest first.
    pub fn undo_to(&mut self, mark: TrailMark) {
        if mark.0 >= self.trail.len() {
            return;
        }
        let dropped = self.trail.split_off(mark.0);
        for (variable, previous) in dropped.into_iter().rev() {
            trace!("undo {}", variable);
            match previous {
                Some(value) => self.values.insert(variable, value),
                None => self.values.remove(&variable),
            };
        }
    }

    /// Extends the assignment to every variable of `formula`, giving
    /// unassigned ones [`DEFAULT_VALUE`]. Existing values are untouched.
    pub fn complete(&mut self, formula: &Formula) {
        for variable in formula.variables() {
            if !self.contains(variable) {
                self.values.insert(variable, DEFAULT_VALUE);
            }
        }
        self.trail.clear();
    }

    /// The assignment as signed literals, e.g. `[1, -2, 3]`.
    pub fn to_dimacs(&self) -> Vec<i64> {
        self.iter().map(|(v, b)| Literal::new(v, b).to_dimacs()).collect()
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Assignment {}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        for (i, (variable, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", variable, value)?;
        }
        f.write_str("}")
    }
}
