//! Arbitrary propositional formulas and their conversion to CNF.
//!
//! Two conversions are provided. [`Prop::to_cnf_distributive`] pushes negations
//! to the leaves with De Morgan's laws and distributes OR over AND; the result is
//! equivalent but can be exponentially larger. [`Prop::to_cnf_switching`] uses a
//! fresh switching variable `z` whenever both sides of a disjunction have more
//! than one clause, rewriting `A | B` as `(z -> A) & (!z -> B)`; the result is
//! only equisatisfiable but stays small.

use crate::assignment::{Assignment, DEFAULT_VALUE};
use crate::formula::{Clause, Formula, Literal, Variable};
use log::trace;
use std::collections::BTreeSet;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Prop {
    Var(Variable),
    Not(Box<Prop>),
    And(Box<Prop>, Box<Prop>),
    Or(Box<Prop>, Box<Prop>),
    Imp(Box<Prop>, Box<Prop>),
    Iff(Box<Prop>, Box<Prop>),
    Xor(Box<Prop>, Box<Prop>),
}

// Negation normal form: only literals, AND and OR.
enum Nnf {
    Lit(Literal),
    And(Box<Nnf>, Box<Nnf>),
    Or(Box<Nnf>, Box<Nnf>),
}

impl Nnf {
    fn and(a: Nnf, b: Nnf) -> Nnf {
        Nnf::And(Box::new(a), Box::new(b))
    }

    fn or(a: Nnf, b: Nnf) -> Nnf {
        Nnf::Or(Box::new(a), Box::new(b))
    }
}

type Clauses = Vec<Vec<Literal>>;

impl Prop {
    pub fn var(x: usize) -> Prop {
        Prop::Var(Variable(x))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(p: Prop) -> Prop {
        Prop::Not(Box::new(p))
    }

    pub fn and(p: Prop, q: Prop) -> Prop {
        Prop::And(Box::new(p), Box::new(q))
    }

    pub fn or(p: Prop, q: Prop) -> Prop {
        Prop::Or(Box::new(p), Box::new(q))
    }

    pub fn imp(p: Prop, q: Prop) -> Prop {
        Prop::Imp(Box::new(p), Box::new(q))
    }

    pub fn iff(p: Prop, q: Prop) -> Prop {
        Prop::Iff(Box::new(p), Box::new(q))
    }

    pub fn xor(p: Prop, q: Prop) -> Prop {
        Prop::Xor(Box::new(p), Box::new(q))
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, into: &mut BTreeSet<Variable>) {
        match self {
            Prop::Var(v) => {
                into.insert(*v);
            }
            Prop::Not(p) => p.collect_variables(into),
            Prop::And(p, q) | Prop::Or(p, q) | Prop::Imp(p, q) | Prop::Iff(p, q) | Prop::Xor(p, q) => {
                p.collect_variables(into);
                q.collect_variables(into);
            }
        }
    }

    /// Truth value under `assignment`; unassigned variables read as [`DEFAULT_VALUE`].
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Prop::Var(v) => assignment.get(*v).unwrap_or(DEFAULT_VALUE),
            Prop::Not(p) => !p.eval(assignment),
            Prop::And(p, q) => p.eval(assignment) && q.eval(assignment),
            Prop::Or(p, q) => p.eval(assignment) || q.eval(assignment),
            Prop::Imp(p, q) => !p.eval(assignment) || q.eval(assignment),
            Prop::Iff(p, q) => p.eval(assignment) == q.eval(assignment),
            Prop::Xor(p, q) => p.eval(assignment) != q.eval(assignment),
        }
    }

    /// NNF of `self` when `positive`, of its negation otherwise.
    fn nnf(&self, positive: bool) -> Nnf {
        match self {
            Prop::Var(v) => Nnf::Lit(Literal::new(*v, positive)),
            Prop::Not(p) => p.nnf(!positive),
            Prop::And(p, q) if positive => Nnf::and(p.nnf(true), q.nnf(true)),
            Prop::And(p, q) => Nnf::or(p.nnf(false), q.nnf(false)),
            Prop::Or(p, q) if positive => Nnf::or(p.nnf(true), q.nnf(true)),
            Prop::Or(p, q) => Nnf::and(p.nnf(false), q.nnf(false)),
            Prop::Imp(p, q) if positive => Nnf::or(p.nnf(false), q.nnf(true)),
            Prop::Imp(p, q) => Nnf::and(p.nnf(true), q.nnf(false)),
            Prop::Iff(p, q) => equivalence(p, q, positive),
            Prop::Xor(p, q) => equivalence(p, q, !positive),
        }
    }

    /// An equivalent CNF formula over the same variables.
    pub fn to_cnf_distributive(&self) -> Formula {
        into_formula(distribute(&self.nnf(true)))
    }

    /// An equisatisfiable CNF formula. Switching variables are numbered from one
    /// past the largest variable of `self`; restricting any model of the result to
    /// the original variables gives a model of `self`.
    pub fn to_cnf_switching(&self) -> Formula {
        let first_fresh = self.variables().into_iter().last().map_or(1, |v| v.0 + 1);
        let mut switching = Switching { next: first_fresh };
        into_formula(switching.clauses(&self.nnf(true)))
    }
}

// (p <-> q) as (!p | q) & (p | !q); its negation as (p | q) & (!p | !q).
fn equivalence(p: &Prop, q: &Prop, positive: bool) -> Nnf {
    Nnf::and(
        Nnf::or(p.nnf(!positive), q.nnf(true)),
        Nnf::or(p.nnf(positive), q.nnf(false)),
    )
}

fn into_formula(clauses: Clauses) -> Formula {
    Formula::new(clauses.into_iter().map(Clause::new))
}

// Every clause of `left` joined with every clause of `right`.
fn product(left: &[Vec<Literal>], right: &[Vec<Literal>]) -> Clauses {
    left.iter()
        .flat_map(|l| right.iter().map(move |r| l.iter().chain(r).copied().collect::<Vec<_>>()))
        .collect()
}

fn distribute(nnf: &Nnf) -> Clauses {
    match nnf {
        Nnf::Lit(l) => vec![vec![*l]],
        Nnf::And(a, b) => {
            let mut clauses = distribute(a);
            clauses.extend(distribute(b));
            clauses
        }
        Nnf::Or(a, b) => product(&distribute(a), &distribute(b)),
    }
}

struct Switching {
    next: usize,
}

impl Switching {
    fn fresh(&mut self) -> Variable {
        let v = Variable(self.next);
        self.next += 1;
        v
    }

    fn clauses(&mut self, nnf: &Nnf) -> Clauses {
        match nnf {
            Nnf::Lit(l) => vec![vec![*l]],
            Nnf::And(a, b) => {
                let mut clauses = self.clauses(a);
                clauses.extend(self.clauses(b));
                clauses
            }
            Nnf::Or(a, b) => {
                let left = self.clauses(a);
                let right = self.clauses(b);
                if left.len() == 1 || right.len() == 1 {
                    return product(&left, &right);
                }
                let z = self.fresh();
                trace!("switching variable {} for {} | {} clauses", z, left.len(), right.len());
                let with = |mut clause: Vec<Literal>, literal| {
                    clause.push(literal);
                    clause
                };
                left.into_iter()
                    .map(|clause| with(clause, Literal::Negative(z)))
                    .chain(right.into_iter().map(|clause| with(clause, Literal::Positive(z))))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn prop_strategy() -> impl proptest::strategy::Strategy<Value = Prop> {
    use proptest::prelude::*;

    let leaf = (1usize..=4).prop_map(Prop::var);
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Prop::not),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Prop::and(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Prop::or(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Prop::imp(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Prop::iff(p, q)),
            (inner.clone(), inner).prop_map(|(p, q)| Prop::xor(p, q)),
        ]
    })
}
