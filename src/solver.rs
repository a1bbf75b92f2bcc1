use crate::assignment::{Assignment, TrailMark};
use crate::formula::{Formula, Variable};
use crate::simplify::{eliminate_pure_literals, substitute, unit_propagate, BcpResult};
use crate::SatResult;
use log::{debug, trace};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stats {
    pub decisions: usize,
    pub conflicts: usize,
    pub propagations: usize,
    pub pure_literals: usize,
}

/// Pending work for the search loop. Popping a `Retry` means everything pushed
/// after it failed.
#[derive(Debug)]
enum Frame {
    Search(Formula),
    Retry {
        formula: Formula,
        variable: Variable,
        mark: TrailMark,
    },
}

pub struct Solver {
    formula: Formula,
    assignment: Assignment,
    stats: Stats,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self {
            formula,
            assignment: Assignment::new(),
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        self.assignment = Assignment::new();
        self.stats = Stats::default();

        let result = if self.search() {
            let mut model = self.assignment.clone();
            model.complete(&self.formula);
            SatResult::Satisfiable(model)
        } else {
            SatResult::Unsatisfiable
        };
        debug!(
            "{} after {} decisions, {} conflicts, {} propagations, {} pure literals",
            if result.is_satisfiable() { "sat" } else { "unsat" },
            self.stats.decisions,
            self.stats.conflicts,
            self.stats.propagations,
            self.stats.pure_literals
        );
        result
    }

    /// DPLL over an explicit stack. On success `self.assignment` holds a partial
    /// model: exactly the values set along the successful path.
    fn search(&mut self) -> bool {
        let mut stack = vec![Frame::Search(self.formula.clone())];

        while let Some(frame) = stack.pop() {
            let formula = match frame {
                Frame::Search(formula) => formula,
                Frame::Retry { formula, variable, mark } => {
                    self.assignment.undo_to(mark);
                    trace!("backtrack: {} = false", variable);
                    self.assignment.assign(variable, false);
                    stack.push(Frame::Search(substitute(&formula, variable, false)));
                    continue;
                }
            };

            let before = self.assignment.len();
            let (formula, bcp) = unit_propagate(formula, &mut self.assignment);
            self.stats.propagations += self.assignment.len() - before;
            if bcp == BcpResult::Conflict {
                self.stats.conflicts += 1;
                continue;
            }

            let before = self.assignment.len();
            let formula = eliminate_pure_literals(formula, &mut self.assignment);
            self.stats.pure_literals += self.assignment.len() - before;

            if formula.is_empty() {
                return true;
            }

            let variable = match self.decide(&formula) {
                Some(variable) => variable,
                None => {
                    self.stats.conflicts += 1;
                    continue;
                }
            };
            self.stats.decisions += 1;
            trace!("decision {} = true at depth {}", variable, stack.len());

            let mark = self.assignment.mark();
            self.assignment.assign(variable, true);
            let first = substitute(&formula, variable, true);
            stack.push(Frame::Retry { formula, variable, mark });
            stack.push(Frame::Search(first));
        }
        false
    }

    /// Branches on the first literal of the first clause. `None` only when that
    /// clause is empty, which propagation has already ruled out.
    fn decide(&self, formula: &Formula) -> Option<Variable> {
        formula.first_literal().map(|literal| literal.variable())
    }

    #[cfg(test)]
    fn partial_model(&self) -> &Assignment {
        &self.assignment
    }
}
