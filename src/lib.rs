pub mod assignment;
pub mod formula;
pub mod repl;
pub mod simplify;
mod solver;

#[cfg(test)]
mod brute_force;

pub use assignment::Assignment;
pub use formula::{Clause, Formula, Literal, Variable};
pub use solver::{Solver, Stats};

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    /// Carries a model covering every variable of the input formula.
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

/// Decides `formula` with a fresh [`Solver`].
pub fn solve(formula: &Formula) -> SatResult {
    Solver::new(formula.clone()).solve()
}
