use clap::{App, Arg};
use dpllsat::formula::{dimacs, text};
use dpllsat::formula::Formula;
use dpllsat::*;
use std::error::Error;
use std::io::Read;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .about("Decides satisfiability of CNF formulas with DPLL")
        .arg(Arg::with_name("INPUT").help("input file (stdin if omitted)").index(1))
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["dimacs", "text"])
                .default_value("dimacs")
                .help("input syntax"),
        )
        .arg(
            Arg::with_name("interactive")
                .short("i")
                .long("interactive")
                .conflicts_with("INPUT")
                .help("read formulas in the text syntax from stdin, one per line"),
        )
        .get_matches();

    if matches.is_present("interactive") {
        let stdin = std::io::stdin();
        if let Err(e) = repl::run(stdin.lock(), std::io::stdout()) {
            eprintln!("io error: {}", e);
            std::process::exit(-1);
        }
        return;
    }

    let f = read_formula(matches.value_of("INPUT"), matches.value_of("format").unwrap_or("dimacs"));

    match f {
        Ok(f) => {
            let mut solver = Solver::new(f.clone());
            let result = solver.solve();
            if let Some(model) = result.model() {
                debug_assert!(f.is_satisfied_by(model));
            }
            log::info!("{:?}", solver.stats());

            if let Err(e) = dimacs::write_result(std::io::stdout(), &result) {
                eprintln!("io error: {}", e);
                std::process::exit(-1);
            }
            let exit_code = match result {
                SatResult::Satisfiable(_) => 0,
                SatResult::Unsatisfiable => 1,
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}

fn read_formula(path: Option<&str>, format: &str) -> Result<Formula, Box<dyn Error>> {
    if format == "text" {
        let input = match path {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                input
            }
        };
        return Ok(text::parse(&input)?);
    }
    match path {
        Some(path) => Ok(dimacs::parse_file(path)?),
        None => Ok(dimacs::parse(std::io::stdin())?),
    }
}
