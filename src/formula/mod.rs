pub mod dimacs;
pub mod prop;
pub mod text;

use crate::assignment::Assignment;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// A propositional variable. Identifiers are positive; 0 is never a variable.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn new(variable: Variable, value: bool) -> Self {
        if value {
            Literal::Positive(variable)
        } else {
            Literal::Negative(variable)
        }
    }

    /// Signed-integer view: sign is polarity, magnitude is the variable. `0` has no literal.
    pub fn from_dimacs(x: i64) -> Option<Self> {
        if x > 0 {
            Some(Literal::Positive(Variable(x as usize)))
        } else if x < 0 {
            Some(Literal::Negative(Variable(x.unsigned_abs() as usize)))
        } else {
            None
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(Variable(x)) => *x as i64,
            Literal::Negative(Variable(x)) => -(*x as i64),
        }
    }

    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// Whether this literal is true when its variable takes `value`.
    pub fn holds_under(&self, value: bool) -> bool {
        self.is_positive() == value
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is the constant false.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|literal| assignment.value_of(literal) == Some(true))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    /// Builds a formula from clauses of signed integers, skipping zeros.
    pub fn from_dimacs<C, L>(clauses: C) -> Self
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i64>,
    {
        Formula::new(
            clauses
                .into_iter()
                .map(|clause| Clause::new(clause.into_iter().filter_map(Literal::from_dimacs))),
        )
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is the constant true.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn first_literal(&self) -> Option<Literal> {
        self.clauses.first().and_then(|clause| clause.literals.first()).copied()
    }

    /// Every variable mentioned by some literal, in ascending order.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals.iter().map(Literal::variable))
            .collect()
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(assignment))
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" AND ")?;
            }
            f.write_str("(")?;
            let mut first_literal = true;
            for literal in &clause.literals {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" OR ")?;
                }
                write!(f, "{}", literal)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Random 3-SAT-ish formulas over at most 6 variables, small enough to brute force.
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    let literal = (1usize..=6, any::<bool>()).prop_map(|(x, positive)| Literal::new(Variable(x), positive));
    let clause = prop::collection::vec(literal, 1..=3).prop_map(Clause::new);
    prop::collection::vec(clause, 1..=12).prop_map(Formula::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_dimacs_view() {
        assert_eq!(Literal::from_dimacs(3), Some(p(3)));
        assert_eq!(Literal::from_dimacs(-7), Some(n(7)));
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(n(7).to_dimacs(), -7);
        assert_eq!(p(2).negated(), n(2));
        assert_eq!(n(2).variable(), Variable(2));
    }

    #[test]
    fn variables_are_sorted_and_unique() {
        let f = Formula::from_dimacs(vec![vec![3, -1], vec![1, 2, -3]]);
        let vars = f.variables().into_iter().collect::<Vec<_>>();
        assert_eq!(vars, vec![Variable(1), Variable(2), Variable(3)]);
    }

    #[test]
    fn clause_unit_and_empty() {
        assert_eq!(Clause::new(vec![p(4)]).unit(), Some(p(4)));
        assert_eq!(Clause::new(vec![p(4), n(5)]).unit(), None);
        assert!(Clause::new(vec![]).is_empty());
        assert!(Formula::new(vec![Clause::new(vec![p(1)]), Clause::new(vec![])]).has_empty_clause());
    }

    #[test]
    fn satisfied_by_assignment() {
        let f = Formula::from_dimacs(vec![vec![1, -2], vec![2]]);
        let mut a = Assignment::new();
        a.assign(Variable(1), true);
        a.assign(Variable(2), true);
        assert!(f.is_satisfied_by(&a));

        a.assign(Variable(1), false);
        assert!(!f.is_satisfied_by(&a));
    }

    #[test]
    fn display_uses_text_grammar() {
        let f = Formula::from_dimacs(vec![vec![1, -2], vec![3]]);
        assert_eq!(f.to_string(), "(1 OR -2) AND (3)");
    }
}
