//! The infix clause syntax used by the interactive loop:
//! `(1 OR -2) AND (-1 OR 3) AND (2 OR -3)`.
//!
//! Clauses are separated by ` AND `, literals by ` OR `, and every clause is
//! wrapped in parentheses. Literals are nonzero signed integers.

use crate::formula::{Clause, Formula, Literal};
use thiserror::Error;

pub const AND: &str = " AND ";
pub const OR: &str = " OR ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextParseError {
    #[error("empty formula")]
    Empty,

    #[error("clause '{0}' is not wrapped in parentheses")]
    MissingParens(String),

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    #[error("0 is not a literal")]
    ZeroLiteral,
}

pub fn parse(input: &str) -> Result<Formula, TextParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TextParseError::Empty);
    }
    input
        .split(AND)
        .map(parse_clause)
        .collect::<Result<Vec<_>, _>>()
        .map(Formula::new)
}

fn parse_clause(s: &str) -> Result<Clause, TextParseError> {
    let s = s.trim();
    let inner = s
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| TextParseError::MissingParens(s.to_string()))?;
    inner
        .split(OR)
        .map(parse_literal)
        .collect::<Result<Vec<_>, _>>()
        .map(Clause::new)
}

fn parse_literal(s: &str) -> Result<Literal, TextParseError> {
    let s = s.trim();
    let x = s
        .parse::<i64>()
        .map_err(|_| TextParseError::InvalidLiteral(s.to_string()))?;
    Literal::from_dimacs(x).ok_or(TextParseError::ZeroLiteral)
}

/// Whether `input` is well-formed in this syntax.
pub fn validate(input: &str) -> bool {
    parse(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn parse_example() {
        let f = parse("(1 OR -2) AND (-1 OR 3) AND (2 OR -3)").expect("failed to parse");
        assert_eq!(f, Formula::from_dimacs(vec![vec![1, -2], vec![-1, 3], vec![2, -3]]));
    }

    #[test]
    fn parse_single_literal_clause() {
        let f = parse("  (-5)  ").expect("failed to parse");
        assert_eq!(f.clauses().next().unwrap().unit(), Some(n(5)));
    }

    #[test]
    fn parse_tolerates_inner_spaces() {
        let f = parse("( 1 OR  2 ) AND (3)").expect("failed to parse");
        assert_eq!(f.clauses().next().unwrap().literals().cloned().collect::<Vec<_>>(), vec![p(1), p(2)]);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse(""), Err(TextParseError::Empty));
        assert_eq!(parse("1 OR 2"), Err(TextParseError::MissingParens("1 OR 2".into())));
        assert_eq!(parse("(1 OR 2"), Err(TextParseError::MissingParens("(1 OR 2".into())));
        assert_eq!(parse("(1 OR a)"), Err(TextParseError::InvalidLiteral("a".into())));
        assert_eq!(parse("()"), Err(TextParseError::InvalidLiteral("".into())));
        assert_eq!(parse("(1 OR 0)"), Err(TextParseError::ZeroLiteral));
        assert_eq!(parse("(1) and (2)"), Err(TextParseError::InvalidLiteral("1) and (2".into())));
        assert!(!validate("(1 | 2)"));
        assert!(validate("(1 OR 2)"));
    }

    #[test]
    fn display_round_trips() {
        let source = "(1 OR -2) AND (3)";
        assert_eq!(parse(source).unwrap().to_string(), source);
    }
}
