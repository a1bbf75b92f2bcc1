use crate::assignment::Assignment;
use crate::formula::{Clause, Formula, Literal, Variable};
use log::trace;
use std::collections::BTreeMap;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum BcpResult {
    Conflict,
    NoConflict,
}

/// Simplifies `formula` under `variable = value`.
///
/// Clauses containing the literal made true are dropped; the literal made false
/// is removed from the rest. A clause that loses all of its literals is kept as
/// an empty clause so the conflict stays visible.
pub fn substitute(formula: &Formula, variable: Variable, value: bool) -> Formula {
    let satisfied = Literal::new(variable, value);
    Formula::new(formula.clauses().filter(|clause| !clause.contains(&satisfied)).map(|clause| {
        Clause::new(
            clause
                .literals()
                .filter(|literal| literal.variable() != variable)
                .copied(),
        )
    }))
}

/// Assigns unit clauses until none remain, always resolving the first unit
/// clause in clause order and rescanning from the start afterwards.
pub fn unit_propagate(mut formula: Formula, assignment: &mut Assignment) -> (Formula, BcpResult) {
    // An empty clause survives every substitution, so there is no point continuing past one.
    while !formula.has_empty_clause() {
        let unit = match formula.clauses().find_map(Clause::unit) {
            Some(literal) => literal,
            None => break,
        };
        trace!("implied {}", unit);
        assignment.assign(unit.variable(), unit.is_positive());
        formula = substitute(&formula, unit.variable(), unit.is_positive());
    }

    if formula.has_empty_clause() {
        (formula, BcpResult::Conflict)
    } else {
        (formula, BcpResult::NoConflict)
    }
}

/// Literals whose negation never occurs in `formula`, in ascending order.
pub fn pure_literals(formula: &Formula) -> Vec<Literal> {
    let mut counts = BTreeMap::new();
    for literal in formula.clauses().flat_map(Clause::literals) {
        *counts.entry(*literal).or_insert(0usize) += 1;
    }
    counts
        .iter()
        .filter(|(literal, count)| **count > 0 && !counts.contains_key(&literal.negated()))
        .map(|(literal, _)| *literal)
        .collect()
}

/// Assigns and substitutes every literal that is pure in `formula` as given.
///
/// Purity is computed once up front. Literals that only become pure as a result
/// of these eliminations are left for a later call.
pub fn eliminate_pure_literals(formula: Formula, assignment: &mut Assignment) -> Formula {
    pure_literals(&formula).into_iter().fold(formula, |formula, literal| {
        trace!("pure {}", literal);
        assignment.assign(literal.variable(), literal.is_positive());
        substitute(&formula, literal.variable(), literal.is_positive())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{formula_3sat_strategy, n, p};
    use proptest::prelude::*;
    use test_env_log::test;

    fn f(clauses: Vec<Vec<i64>>) -> Formula {
        Formula::from_dimacs(clauses)
    }

    #[test]
    fn substitute_drops_satisfied_and_shrinks_falsified() {
        let formula = f(vec![vec![1, 2], vec![-1, 3], vec![2, 3]]);
        assert_eq!(substitute(&formula, Variable(1), true), f(vec![vec![3], vec![2, 3]]));
        assert_eq!(substitute(&formula, Variable(1), false), f(vec![vec![2], vec![2, 3]]));
    }

    #[test]
    fn substitute_keeps_emptied_clause() {
        let formula = f(vec![vec![1], vec![-1]]);
        let result = substitute(&formula, Variable(1), true);
        assert_eq!(result.len(), 1);
        assert!(result.has_empty_clause());
    }

    #[test]
    fn substitute_tautology_is_dropped() {
        let formula = f(vec![vec![1, -1, 2]]);
        assert!(substitute(&formula, Variable(1), false).is_empty());
    }

    #[test]
    fn unit_propagate_chains() {
        let mut a = Assignment::new();
        let (result, status) = unit_propagate(f(vec![vec![1], vec![-1, 2], vec![-2, 3, 4]]), &mut a);
        assert_eq!(status, BcpResult::NoConflict);
        assert_eq!(result, f(vec![vec![3, 4]]));
        assert_eq!(a.get(Variable(1)), Some(true));
        assert_eq!(a.get(Variable(2)), Some(true));
        assert_eq!(a.get(Variable(3)), None);
    }

    #[test]
    fn unit_propagate_conflict() {
        let mut a = Assignment::new();
        let (result, status) = unit_propagate(f(vec![vec![1], vec![-1]]), &mut a);
        assert_eq!(status, BcpResult::Conflict);
        assert!(result.has_empty_clause());
    }

    #[test]
    fn unit_propagate_takes_first_unit_in_order() {
        let mut a = Assignment::new();
        let (result, status) = unit_propagate(f(vec![vec![3, 4], vec![-2], vec![2]]), &mut a);
        assert_eq!(status, BcpResult::Conflict);
        assert_eq!(result, f(vec![vec![3, 4], vec![]]));
        assert_eq!(a.get(Variable(2)), Some(false));
    }

    #[test]
    fn pure_literals_found() {
        let formula = f(vec![vec![1, 2], vec![1, -2], vec![-3, 2]]);
        assert_eq!(pure_literals(&formula), vec![p(1), n(3)]);
    }

    #[test]
    fn pure_elimination_is_single_pass() {
        // Only 1 is pure initially. Removing (1 | 2) leaves -2 pure, which must wait for the next pass.
        let mut a = Assignment::new();
        let result = eliminate_pure_literals(f(vec![vec![1, 2], vec![-2, 3], vec![-2, -3]]), &mut a);
        assert_eq!(result, f(vec![vec![-2, 3], vec![-2, -3]]));
        assert_eq!(a.get(Variable(1)), Some(true));
        assert_eq!(a.get(Variable(2)), None);

        let result = eliminate_pure_literals(result, &mut a);
        assert!(result.is_empty());
        assert_eq!(a.get(Variable(2)), Some(false));
    }

    #[test]
    fn pure_elimination_assigns_vanished_literals() {
        // both 1 and 2 are pure up front; substituting 1 removes the only clause with 2
        let mut a = Assignment::new();
        let result = eliminate_pure_literals(f(vec![vec![1, 2]]), &mut a);
        assert!(result.is_empty());
        assert_eq!(a.get(Variable(1)), Some(true));
        assert_eq!(a.get(Variable(2)), Some(true));
    }

    proptest! {
        #[test]
        fn substitute_is_idempotent(formula in formula_3sat_strategy(), x in 1usize..=6, value in any::<bool>()) {
            let once = substitute(&formula, Variable(x), value);
            let twice = substitute(&once, Variable(x), value);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn unit_propagate_reaches_fixed_point(formula in formula_3sat_strategy()) {
            let mut a = Assignment::new();
            let (result, status) = unit_propagate(formula, &mut a);
            match status {
                BcpResult::NoConflict => {
                    prop_assert!(result.clauses().all(|c| c.len() != 1));
                    prop_assert!(!result.has_empty_clause());
                }
                BcpResult::Conflict => prop_assert!(result.has_empty_clause()),
            }
        }
    }
}
