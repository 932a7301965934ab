mod config;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use config::{Command, Config};
use maze::{decode, encode, Maze, Plan};
use solver::{
    Bruteforce, DavisPutnam, Formula, Instance, ProblemFile, SATSolution, SolutionFile, Solver,
    TimedSolver, Universe,
};
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::process::exit;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn input_arg<'a, 'b>(help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name("input")
        .short("i")
        .long("input")
        .takes_value(true)
        .help(help)
}

fn output_arg<'a, 'b>(help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .takes_value(true)
        .help(help)
}

fn path_of(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.value_of(name).map(PathBuf::from)
}

fn make_config() -> Config {
    let matches = App::new("satisfaction")
        .version("1.0")
        .author("Alex&Korbi&Radek inc.")
        .about("Finds treasure hunting walks with the Davis-Putnam procedure")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .value_name("ALGORITHM")
                .help("SAT solving algorithm")
                .takes_value(true)
                .global(true)
                .possible_values(&["dpll", "bruteforce"])
                .default_value("dpll"),
        )
        .arg(
            Arg::with_name("return_code")
                .long("return-code")
                .short("r")
                .global(true)
                .help("Will return 1 if satisfiable and 0 if not (useful for scripting)")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .global(true)
                .help("Log search progress to standard error")
                .takes_value(false),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Compiles a maze description into clauses and a symbol table")
                .arg(input_arg("Maze description"))
                .arg(output_arg("File name for the problem file")),
        )
        .subcommand(
            SubCommand::with_name("solve")
                .about("Decides satisfiability of a problem file")
                .arg(input_arg("Problem file"))
                .arg(output_arg("File name for the solution file"))
                .arg(
                    Arg::with_name("dimacs")
                        .long("dimacs")
                        .help("Read DIMACS CNF and answer in DIMACS format")
                        .takes_value(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("Turns a solution file into a walk")
                .arg(input_arg("Solution file")),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Encodes, solves and decodes a maze in one go")
                .arg(input_arg("Maze description"))
                .arg(
                    Arg::with_name("problem")
                        .long("problem")
                        .takes_value(true)
                        .help("Keep the problem file at this path"),
                )
                .arg(
                    Arg::with_name("solution")
                        .long("solution")
                        .takes_value(true)
                        .help("Keep the solution file at this path"),
                ),
        )
        .get_matches();

    // global arguments given after the subcommand land in its matches
    let sub = matches.subcommand().1;
    let flag =
        |name: &str| matches.is_present(name) || sub.map_or(false, |sub| sub.is_present(name));
    let algorithm = sub
        .filter(|sub| sub.occurrences_of("algorithm") > 0)
        .and_then(|sub| sub.value_of("algorithm"))
        .or_else(|| matches.value_of("algorithm"));

    let solver: Box<dyn Solver> = match algorithm {
        Some("bruteforce") => Box::new(Bruteforce::Bruteforce),
        Some("dpll") => Box::new(DavisPutnam),
        _ => unreachable!(), // already handled by clap
    };

    let command = match matches.subcommand() {
        ("encode", Some(sub)) => Command::Encode {
            input: path_of(sub, "input"),
            output: path_of(sub, "output"),
        },
        ("solve", Some(sub)) => Command::Solve {
            input: path_of(sub, "input"),
            output: path_of(sub, "output"),
            dimacs: sub.is_present("dimacs"),
        },
        ("decode", Some(sub)) => Command::Decode { input: path_of(sub, "input") },
        ("run", Some(sub)) => Command::Run {
            input: path_of(sub, "input"),
            problem: path_of(sub, "problem"),
            solution: path_of(sub, "solution"),
        },
        _ => unreachable!(), // already handled by clap
    };

    Config {
        command,
        solver,
        return_code: flag("return_code"),
        verbose: flag("verbose"),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn read_input(path: &Option<PathBuf>) -> io::Result<String> {
    match path {
        None => {
            info!("No input file specified. Reading from standard input...");
            get_input(&mut io::stdin())
        }
        Some(file) => get_input(&mut File::open(file)?),
    }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => write_file(path, content),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    debug!(path = %path.display(), bytes = content.len(), "writing file");
    std::fs::write(path, content)
}

/// Universe `1..=n` for DIMACS input, where `n` is the largest atom used
fn dimacs_instance(formula: Formula) -> Result<Instance, solver::InputError> {
    let largest = formula.atoms().into_iter().max().unwrap_or(0);
    Instance::new((1..=largest).collect::<Universe>(), formula)
}

fn solve(config: &Config, instance: &Instance) -> SATSolution {
    TimedSolver::new(&config.solver).solve(instance)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = make_config();
    init_logging(config.verbose);

    let satisfiable = match &config.command {
        Command::Encode { input, output } => {
            let maze: Maze = read_input(input)?.parse()?;
            write_output(output, &encode(&maze)?.to_string())?;
            None
        }
        Command::Solve { input, output, dimacs: true } => {
            let instance = dimacs_instance(Formula::from_dimacs(&read_input(input)?)?)?;
            let solution = solve(&config, &instance);
            write_output(output, &solution.to_dimacs())?;
            Some(solution.is_sat())
        }
        Command::Solve { input, output, dimacs: false } => {
            let problem = ProblemFile::parse(&read_input(input)?)?;
            let solution = solve(&config, &problem.instance()?);
            let satisfiable = solution.is_sat();
            write_output(output, &SolutionFile::new(solution, problem.symbols).to_string())?;
            Some(satisfiable)
        }
        Command::Decode { input } => {
            let solution = SolutionFile::parse(&read_input(input)?)?;
            println!("{}", decode(&solution));
            None
        }
        Command::Run { input, problem: problem_path, solution: solution_path } => {
            let maze: Maze = read_input(input)?.parse()?;
            let problem = encode(&maze)?;
            if let Some(path) = problem_path {
                write_file(path, &problem.to_string())?;
            }

            let solution = solve(&config, &problem.instance()?);
            let satisfiable = solution.is_sat();
            let solution = SolutionFile::new(solution, problem.symbols);
            if let Some(path) = solution_path {
                write_file(path, &solution.to_string())?;
            }

            let plan = decode(&solution);
            println!("{}", plan);
            Some(satisfiable && plan != Plan::NoSolution)
        }
    };

    if config.return_code && satisfiable == Some(true) {
        exit(1);
    }
    Ok(())
}
