//! Balance simulator CLI.
//!
//! Runs headless arena campaigns and scripted survival runs to analyze
//! game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 100 campaigns, 1 hour each
//!   cargo run --bin simulate -- -n 20 -t 600     # 20 campaigns, 10 minutes each
//!   cargo run --bin simulate -- --seed 42 -S 10  # Reproducible, with survival

use ascend::build_info::version_line;
use ascend::core::config::EngineConfig;
use ascend::simulator::{run_simulation, SimConfig};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ASCEND BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Campaigns:      {}", config.num_runs);
    println!("  Arena Time:     {:.0}s", config.arena_seconds);
    println!("  Tick Length:    {:.2}s", config.tick_seconds);
    if config.survival_runs > 0 {
        println!(
            "  Survival:       {} runs, up to {} frames",
            config.survival_runs, config.max_frames
        );
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                log::error!("failed to write {}: {}", filename, e);
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    // The preset is the base; every other flag overrides it regardless of order.
    let mut config = if args.iter().any(|a| a == "--quick") {
        SimConfig::quick()
    } else {
        SimConfig::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--time" => {
                if i + 1 < args.len() {
                    config.arena_seconds = args[i + 1].parse().unwrap_or(3600.0);
                    i += 1;
                }
            }
            "-S" | "--survival" => {
                if i + 1 < args.len() {
                    config.survival_runs = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config.engine = load_engine_config(&args[i + 1]);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {}
            "-V" | "--version" => {
                println!("ascend simulate {}", version_line());
                process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn load_engine_config(path: &str) -> EngineConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| EngineConfig::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Could not load engine config {}: {}", path, e);
            process::exit(2);
        }
    }
}

fn print_help() {
    println!("Ascend Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>       Number of arena campaigns (default: 100)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -t, --time <SECS>    Arena time per campaign (default: 3600)");
    println!("    -S, --survival <N>   Number of scripted survival runs (default: 0)");
    println!("    -f, --frames <F>     Frame limit per survival run (default: 36,000)");
    println!("    -c, --config <FILE>  JSON engine tuning overrides");
    println!("    -v, --verbose        Per-run output");
    println!("    --json               Save JSON report");
    println!("    --quick              Quick check (10 short campaigns, 5 survival runs)");
    println!("    -V, --version        Print build commit and date");
    println!("    -h, --help           Show this help");
    println!();
    println!("Set RUST_LOG=info to follow level-ups and world rollovers.");
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
    fn test_quick_keeps_earlier_flags() {
        let config = parse_args(&args(&["--seed", "42", "-S", "3", "--quick"]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.survival_runs, 3);
        assert_eq!(config.num_runs, SimConfig::quick().num_runs);
        assert_eq!(config.arena_seconds, SimConfig::quick().arena_seconds);
    }

    #[test]
    fn test_flags_override_quick_preset() {
        let config = parse_args(&args(&["--quick", "-n", "4", "-t", "30"]));
        assert_eq!(config.num_runs, 4);
        assert_eq!(config.arena_seconds, 30.0);
        assert_eq!(config.max_frames, SimConfig::quick().max_frames);
    }
}
