//! Line-oriented interactive solving over the infix clause syntax.

use crate::formula::text;
use crate::{solve, SatResult};
use log::debug;
use std::io::{self, BufRead, Write};

pub const EXIT_COMMAND: &str = "exit";

/// Reads formulas line by line from `input` until `exit` or end of input,
/// answering each one on `output`.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "Welcome to the interactive DPLL SAT solver")?;
    writeln!(output, "Input your CNF formula using the format: (1 OR -2) AND (-1 OR 3) AND (2 OR -3)")?;
    writeln!(output, "Type '{}' to quit the program.", EXIT_COMMAND)?;

    let mut lines = input.lines();
    loop {
        write!(output, "\nEnter your formula: ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();

        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            writeln!(output, "Exiting the program. Goodbye!")?;
            break;
        }

        let formula = match text::parse(line) {
            Ok(formula) => formula,
            Err(e) => {
                debug!("rejected {:?}: {}", line, e);
                writeln!(
                    output,
                    "Invalid CNF format ({}). Please use the format: (literal1 OR literal2) AND (literal3 OR ... )",
                    e
                )?;
                continue;
            }
        };

        match solve(&formula) {
            SatResult::Satisfiable(model) => writeln!(output, "SATISFIABLE with assignment: {}", model)?,
            SatResult::Unsatisfiable => writeln!(output, "UNSATISFIABLE")?,
        }
    }
    Ok(())
}
