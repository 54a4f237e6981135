//! Reward draw simulator CLI.
//!
//! Draws many rewards and checks the tier frequencies against the table.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 100,000 draws, reference table
//!   cargo run --bin simulate -- -n 1000000 -s 42     # Reproducible large run
//!   cargo run --bin simulate -- --table nusantara    # Nine-catch table

use fishy_fortune::simulator::{run_simulation, SimConfig};
use fishy_fortune::utils::logging::init_stderr_logger;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_stderr_logger();

    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              FISHY FORTUNE DRAW SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Draws:  {}", config.draws);
        println!("  Table:  {}", config.table);
        if let Some(seed) = config.seed {
            println!("  Seed:   {}", seed);
        }
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }

    if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut draws: Option<u64> = None;
    let mut quick = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--draws" => {
                if i + 1 < args.len() {
                    draws = args[i + 1].parse().ok().or(draws);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--table" => {
                if i + 1 < args.len() {
                    config.table = args[i + 1].clone();
                    i += 1;
                }
            }
            "--quick" => {
                quick = true;
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                log::warn!("Ignoring unknown argument '{}'", other);
            }
        }
        i += 1;
    }

    if quick {
        config = config.quick();
    }
    // An explicit draw count wins over --quick regardless of order
    if let Some(draws) = draws {
        config.draws = draws;
    }

    (config, json)
}

fn print_help() {
    println!("Fishy Fortune Draw Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --draws <N>     Number of draws (default: 100,000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --table <NAME>  reference | nusantara (default: reference)");
    println!("    --quick             Quick seeded check (10,000 draws)");
    println!("    --json              Print the report as JSON");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXIT STATUS:");
    println!("    0 when the chi-squared test passes, 1 when it fails, 2 on bad input");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_quick_keeps_table() {
        let (config, json) = parse_args(&args(&["--table", "nusantara", "--quick"]));
        assert_eq!(config.table, "nusantara");
        assert_eq!(config.draws, 10_000);
        assert_eq!(config.seed, Some(42));
        assert!(!json);
    }

    #[test]
    fn test_draw_count_survives_quick_in_either_order() {
        for list in [["-n", "500", "--quick"], ["--quick", "-n", "500"]] {
            let (config, _) = parse_args(&args(&list));
            assert_eq!(config.draws, 500, "{list:?}");
        }
    }

    #[test]
    fn test_seed_before_quick_is_kept() {
        let (config, _) = parse_args(&args(&["-s", "9", "--quick", "--json"]));
        assert_eq!(config.seed, Some(9));
    }
}
