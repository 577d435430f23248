use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use u_heldkarp::brute_force::{self, MAX_BRUTE_FORCE_CITIES};
use u_heldkarp::heldkarp::{HeldKarpConfig, HeldKarpResult, HeldKarpRunner, DEFAULT_MAX_CITIES};
use u_heldkarp::instance::Instance;
use u_heldkarp::logging::{init_logger, LogLevel};
use u_heldkarp::{Result, TspError};

/// Solve a Euclidean TSP instance exactly and print the optimal tour cost
/// rounded down to an integer.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Instance file: city count on the first line, then one "x y" per line
    file: PathBuf,

    /// Also print the optimal tour as space-separated city ids
    #[arg(long)]
    tour: bool,

    /// Print the exact cost instead of rounding it down
    #[arg(long)]
    exact: bool,

    /// Build each subset layer in parallel
    #[arg(long)]
    parallel: bool,

    /// Refuse instances with more cities than this
    #[arg(long, default_value_t = DEFAULT_MAX_CITIES)]
    max_cities: usize,

    /// Abort after this many milliseconds
    #[arg(long, value_name = "MS")]
    time_limit: Option<u64>,

    /// Cross-check the result against exhaustive search
    #[arg(long)]
    brute_force: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger(cli.log_level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    let outcome = run(&cli, &mut io::stdout().lock());
    exit_code(outcome)
}

fn exit_code(outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let instance = Instance::from_path(&cli.file)?;
    log::info!("loaded {} cities from {}", instance.len(), cli.file.display());

    let mut config = HeldKarpConfig::default()
        .with_reconstruct_tour(cli.tour)
        .with_parallel(cli.parallel)
        .with_max_cities(cli.max_cities);
    if let Some(ms) = cli.time_limit {
        config = config.with_time_limit_ms(ms);
    }

    let dist = instance.distance_matrix();
    let result = HeldKarpRunner::run(&dist, &config)?;

    if cli.brute_force {
        if instance.len() > MAX_BRUTE_FORCE_CITIES {
            return Err(TspError::invalid_input(format!(
                "--brute-force supports at most {MAX_BRUTE_FORCE_CITIES} cities"
            )));
        }
        let reference = brute_force::solve(&dist)?;
        let tolerance = 1e-9 * reference.cost.max(1.0);
        if (reference.cost - result.cost).abs() > tolerance {
            return Err(TspError::internal(format!(
                "held-karp cost {} disagrees with brute force {}",
                result.cost, reference.cost
            )));
        }
        log::info!(
            "brute force agrees: {} tours evaluated",
            reference.tours_evaluated
        );
    }

    write_report(out, &result, cli.exact)?;
    Ok(())
}

/// Cost on the first line, then the closed tour when one was reconstructed.
fn write_report(out: &mut impl Write, result: &HeldKarpResult, exact: bool) -> io::Result<()> {
    if exact {
        writeln!(out, "{}", result.cost)?;
    } else {
        writeln!(out, "{}", result.floored_cost())?;
    }
    if let Some(tour) = &result.tour {
        writeln!(out, "{tour}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SQUARE: &str = "4\n0 0\n0 1\n1 1\n1 0\n";

    fn instance_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("u-heldkarp-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn run_cli(args: &[&str]) -> (Result<()>, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let outcome = run(&cli, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "u-heldkarp",
            "--tour",
            "--parallel",
            "--time-limit",
            "250",
            "--log-level",
            "debug",
            "tsp.txt",
        ])
        .unwrap();
        assert!(cli.tour && cli.parallel);
        assert!(!cli.exact && !cli.brute_force);
        assert_eq!(cli.time_limit, Some(250));
        assert_eq!(cli.max_cities, DEFAULT_MAX_CITIES);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.file, PathBuf::from("tsp.txt"));
    }

    #[test]
    fn test_missing_file_argument_rejected() {
        assert!(Cli::try_parse_from(["u-heldkarp"]).is_err());
    }

    #[test]
    fn test_report_floored_and_exact() {
        let result = HeldKarpResult {
            cost: 2.0 * 2f64.sqrt(),
            tour: None,
            layers: 1,
            states: 1,
            elapsed_ms: 0,
        };
        let mut out = Vec::new();
        write_report(&mut out, &result, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n");

        let mut out = Vec::new();
        write_report(&mut out, &result, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", 2.0 * 2f64.sqrt()));
    }

    #[test]
    fn test_square_prints_cost_and_closed_tour() {
        let path = instance_file("square.txt", SQUARE);
        let file = path.to_str().unwrap();

        let (outcome, stdout) = run_cli(&["u-heldkarp", file]);
        assert!(outcome.is_ok());
        assert_eq!(stdout, "4\n");

        let (outcome, stdout) = run_cli(&["u-heldkarp", "--tour", "--brute-force", file]);
        assert!(outcome.is_ok());
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines[0], "4");
        assert!(lines[1] == "0 1 2 3 0" || lines[1] == "0 3 2 1 0", "got {}", lines[1]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_errors_exit_with_failure() {
        let missing = std::env::temp_dir().join("u-heldkarp-no-such-instance.txt");
        let (outcome, stdout) = run_cli(&["u-heldkarp", missing.to_str().unwrap()]);
        assert!(matches!(outcome, Err(TspError::Io(_))));
        assert!(stdout.is_empty());
        assert_eq!(exit_code(outcome), ExitCode::FAILURE);

        let path = instance_file("five.txt", "5\n0 0\n1 0\n2 0\n3 0\n4 0\n");
        let (outcome, _) = run_cli(&["u-heldkarp", "--max-cities", "4", path.to_str().unwrap()]);
        assert!(matches!(outcome, Err(TspError::InvalidInput(_))));
        fs::remove_file(path).unwrap();

        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
    }
}
