use crate::*;

// Exhaustive enumeration for checking the solver in tests. Returns the first model found.
pub(crate) fn solve_brute_force(f: &Formula) -> Option<Assignment> {
    let variables = f.variables().into_iter().collect::<Vec<_>>();
    assert!(variables.len() <= 15); // just for safety

    'search: for bits in 0..2u32.pow(variables.len() as u32) {
        let mut assignment = Assignment::new();
        for (i, variable) in variables.iter().enumerate() {
            assignment.assign(*variable, bits & (1 << i) == 0);
        }
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment.value_of(literal) == Some(true) {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return Some(assignment);
    }
    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2]);

        let model = solve_brute_force(&f).expect("should be satisfiable");
        assert!(f.is_satisfied_by(&model));
    }

    #[test]
    fn brute_force_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn brute_force_empty_clause() {
        let f = Formula::new(vec![Clause::new(vec![p(1)]), Clause::new(vec![])]);
        assert_eq!(solve_brute_force(&f), None);
    }
}
