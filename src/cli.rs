use std::env;

use crate::data::boss::{load_boss_table, DEFAULT_BOSS_TABLE_PATH};
use crate::data::digimon::{load_roster, DEFAULT_ROSTER_PATH};
use crate::data::import::{import_roster_csv, DEFAULT_IMPORT_OUTPUT_PATH};
use crate::data::registry::{load_registry, record_update, save_registry, DEFAULT_REGISTRY_PATH};
use crate::data::validate::validate_roster_file;
use crate::engine::selection::{Randomizer, RangeOptions};
use crate::engine::tiers::Generation;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Randomize,
    Reroll,
    Import,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("randomize") => Some(Command::Randomize),
        Some("reroll") => Some(Command::Reroll),
        Some("import") => Some(Command::Import),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Randomize) => handle_randomize(args),
        Some(Command::Reroll) => handle_reroll(args),
        Some(Command::Import) => handle_import(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: tamer <serve|randomize|reroll|import|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("TAMER_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_randomize(args: &[String]) -> i32 {
    let max_generation = parse_generation_arg(args.get(2), Generation::Rookie);
    let count = parse_usize_arg(args.get(3), "count", 3);
    let mut randomizer = match args.get(4) {
        Some(seed) => Randomizer::new(seed.clone()),
        None => Randomizer::with_random_seed(),
    };
    let boss_order = args.get(5).and_then(|value| value.parse::<u32>().ok());

    let roster = match load_roster(DEFAULT_ROSTER_PATH) {
        Ok(roster) => roster,
        Err(err) => {
            eprintln!("unable to load roster '{DEFAULT_ROSTER_PATH}': {err}");
            return 1;
        }
    };

    let options = RangeOptions {
        boss_order,
        ..RangeOptions::default()
    };
    let team = randomizer.random_team_multi(&roster, max_generation, count, &[], &options);

    let payload = serde_json::json!({
        "seed": randomizer.seed(),
        "max_generation": max_generation,
        "team": team,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize team: {err}");
            1
        }
    }
}

fn handle_reroll(args: &[String]) -> i32 {
    let Some(seed) = args.get(2) else {
        eprintln!("usage: tamer reroll <seed> [max_generation] [current_team_numbers]");
        return 2;
    };
    let max_generation = parse_generation_arg(args.get(3), Generation::Rookie);
    let current_team: Vec<String> = args
        .get(4)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|number| !number.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let roster = match load_roster(DEFAULT_ROSTER_PATH) {
        Ok(roster) => roster,
        Err(err) => {
            eprintln!("unable to load roster '{DEFAULT_ROSTER_PATH}': {err}");
            return 1;
        }
    };

    let mut randomizer = Randomizer::new(seed.clone());
    let replacement = randomizer.reroll_slot(
        &roster,
        max_generation,
        &current_team,
        &RangeOptions::default(),
    );

    let payload = serde_json::json!({
        "seed": seed,
        "replacement": replacement,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize reroll result: {err}");
            1
        }
    }
}

fn handle_import(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: tamer import <path-to-roster.csv>");
        return 2;
    };
    let output = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(DEFAULT_IMPORT_OUTPUT_PATH);

    match import_roster_csv(path, output) {
        Ok(report) => {
            println!(
                "import complete: imported={}, duplicates={}, unresolved={}, output='{}'",
                report.imported_records,
                report.duplicate_records,
                report.unresolved_records,
                report.output_path
            );
            for row in &report.unresolved {
                eprintln!("- record {}: {}", row.record_index, row.reason);
            }
            if output == DEFAULT_IMPORT_OUTPUT_PATH {
                let mut registry = load_registry(DEFAULT_REGISTRY_PATH);
                record_update(&mut registry, "roster", path, &report.output_path);
                if let Err(err) = save_registry(DEFAULT_REGISTRY_PATH, &registry) {
                    eprintln!("warning: could not update data registry: {err}");
                }
            }
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_ROSTER_PATH);
    let bosses = load_boss_table(DEFAULT_BOSS_TABLE_PATH);

    let report = validate_roster_file(path, bosses.as_ref());
    if report.diagnostics.is_empty() {
        println!("validation passed: {path}");
        return 0;
    }
    for diagnostic in &report.diagnostics {
        println!(
            "[{}] {}: {}",
            diagnostic.severity, diagnostic.context, diagnostic.message
        );
    }
    if report.has_errors() {
        eprintln!("validation failed: {path}");
        1
    } else {
        0
    }
}

fn parse_generation_arg(raw: Option<&String>, default: Generation) -> Generation {
    raw.and_then(|value| Generation::from_label(value))
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid generation '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
