use crate::formula::{Clause, Formula, Literal};
use crate::SatResult;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Format(String),
}

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut clause = vec![];
    let mut num_clauses = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"%") => break,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                if num_clauses.is_none() {
                    return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
                }

                // clauses end at 0 and may span lines
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None if clause.is_empty() => {
                            return Err(DimacsParseError::Format(format!("empty clause {}", clauses.len() + 1)))
                        }
                        None => clauses.push(Clause::new(clause.drain(..))),
                    }
                }
            }
        }
    }

    let num_clauses = num_clauses.ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

    // a trailing clause without its terminating 0
    if !clause.is_empty() {
        clauses.push(Clause::new(clause));
    }
    if clauses.len() != num_clauses {
        warn!("header declares {} clauses, read {}", num_clauses, clauses.len());
    }

    Ok(Formula::new(clauses))
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

/// Writes `formula` with a header sized to its largest variable.
pub fn write_formula<W: Write>(writer: W, formula: &Formula) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    let num_variables = formula.variables().into_iter().last().map_or(0, |v| v.0);
    writeln!(writer, "p cnf {} {}", num_variables, formula.len())?;
    for clause in formula.clauses() {
        for literal in clause.literals() {
            write!(writer, "{} ", literal)?;
        }
        writeln!(writer, "0")?;
    }
    writer.flush()
}

/// Writes the result in the competition output format: an `s` line and, for
/// satisfiable formulas, the model on `v` lines terminated by `0`.
pub fn write_result<W: Write>(writer: W, result: &SatResult) -> std::io::Result<()> {
    const PER_LINE: usize = 10;

    let mut writer = BufWriter::new(writer);
    match result {
        SatResult::Unsatisfiable => writeln!(writer, "s UNSATISFIABLE")?,
        SatResult::Satisfiable(model) => {
            writeln!(writer, "s SATISFIABLE")?;
            for chunk in model.to_dimacs().chunks(PER_LINE) {
                let line = chunk.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" ");
                writeln!(writer, "v {}", line)?;
            }
            writeln!(writer, "v 0")?;
        }
    }
    writer.flush()
}
