use std::io;

use serde::Serialize;

use crate::artifact::ArtifactSet;
use crate::config::{default_scenario_path, ConfigError, Scenario};
use crate::data::{bundled, ReferenceData, StatProvider};
use crate::optimizer::{
    global_main_stat_optimizer_parallel, optimize_substats, rank_main_stat_combinations,
    MainStatResult, MainStatSelection, SubstatSummary, REFERENCE_LEVEL, REFERENCE_RARITY,
};
use crate::rotation::{write_breakdown_csv, ActionDamage};
use crate::stats::StatTable;

const USAGE: &str = "usage: artifactor <evaluate|mains|substats|lookup>";
const DEFAULT_TOP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Evaluate,
    Mains,
    Substats,
    Lookup,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("evaluate") => Some(Command::Evaluate),
        Some("mains") => Some(Command::Mains),
        Some("substats") => Some(Command::Substats),
        Some("lookup") => Some(Command::Lookup),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Evaluate) => handle_evaluate(args),
        Some(Command::Mains) => handle_mains(args),
        Some(Command::Substats) => handle_substats(args),
        Some(Command::Lookup) => handle_lookup(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    total_damage: f64,
    breakdown: Vec<ActionDamage>,
    stats: StatTable,
}

#[derive(Debug, Serialize)]
struct SubstatReport {
    main_stats: MainStatSelection,
    substats: SubstatSummary,
    energy_recharge_requirement: f64,
    total_damage: f64,
    stats: StatTable,
}

fn handle_evaluate(args: &[String]) -> i32 {
    let as_csv = args.iter().any(|arg| arg == "--csv");
    let Some((scenario, provider)) = load_scenario(args) else {
        return 1;
    };

    let stats = match scenario.final_stats(provider) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("evaluation failed: {err}");
            return 1;
        }
    };
    let rotation = scenario.rotation();
    let breakdown = rotation.breakdown(&stats);

    if as_csv {
        return match write_breakdown_csv(&breakdown, io::stdout()) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("failed to write breakdown csv: {err}");
                1
            }
        };
    }

    print_json(&EvaluationReport {
        total_damage: rotation.evaluate(&stats),
        breakdown,
        stats,
    })
}

fn handle_mains(args: &[String]) -> i32 {
    let top = parse_u32_arg(flag_value(args, "--top"), "top", DEFAULT_TOP);
    let Some((scenario, provider)) = load_scenario(args) else {
        return 1;
    };

    let base = match scenario.base_stats(provider) {
        Ok(base) => base,
        Err(err) => {
            eprintln!("main stat search failed: {err}");
            return 1;
        }
    };
    let ranked: Vec<MainStatResult> = rank_main_stat_combinations(&base, &scenario.rotation())
        .into_iter()
        .take(top as usize)
        .collect();
    print_json(&ranked)
}

fn handle_substats(args: &[String]) -> i32 {
    let Some((scenario, provider)) = load_scenario(args) else {
        return 1;
    };

    match run_substats(&scenario, provider) {
        Ok(report) => print_json(&report),
        Err(err) => {
            eprintln!("substat allocation failed: {err}");
            1
        }
    }
}

fn run_substats(
    scenario: &Scenario,
    provider: &dyn StatProvider,
) -> Result<SubstatReport, ConfigError> {
    let base = scenario.base_stats(provider)?;
    let rotation = scenario.rotation();
    let requirement = scenario.energy_recharge_requirement()?;

    // Optimize main stats only when the scenario does not fix them.
    let set = match &scenario.artifacts {
        Some(spec) => spec.set()?,
        None => {
            let mains = global_main_stat_optimizer_parallel(&base, &rotation);
            ArtifactSet::uniform(
                REFERENCE_RARITY,
                REFERENCE_LEVEL,
                mains.sands,
                mains.goblet,
                mains.circlet,
            )?
        }
    };

    let outcome = optimize_substats(&base, &rotation, &set, requirement)?;
    let stats = base.merged(&outcome.builder.build());
    Ok(SubstatReport {
        main_stats: MainStatSelection {
            sands: set.sands.main_stat(),
            goblet: set.goblet.main_stat(),
            circlet: set.circlet.main_stat(),
        },
        substats: outcome.summary(),
        energy_recharge_requirement: requirement,
        total_damage: rotation.evaluate(&stats),
        stats,
    })
}

fn handle_lookup(args: &[String]) -> i32 {
    let (Some(kind), Some(_)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: artifactor lookup <character|weapon> <name>");
        return 2;
    };
    let name = args[3..].join(" ");

    let data: &ReferenceData = match bundled() {
        Ok(data) => data,
        Err(err) => {
            eprintln!("lookup failed: {err}");
            return 1;
        }
    };
    let (result, known): (_, Vec<&str>) = match kind.as_str() {
        "character" => (data.character_base_stats(&name), data.character_names().collect()),
        "weapon" => (data.weapon_stats(&name), data.weapon_names().collect()),
        other => {
            eprintln!("unknown lookup kind '{other}', expected character or weapon");
            return 2;
        }
    };

    match result {
        Ok(stats) => print_json(&stats),
        Err(err) => {
            eprintln!("lookup failed: {err}");
            eprintln!("known {kind}s: {}", known.join(", "));
            1
        }
    }
}

/// Loads the scenario named by the first positional argument, or the default path.
fn load_scenario(args: &[String]) -> Option<(Scenario, &'static ReferenceData)> {
    let path = positional_args(args)
        .next()
        .map(str::to_string)
        .unwrap_or_else(default_scenario_path);

    let scenario = match Scenario::from_path(&path) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{err}");
            return None;
        }
    };
    match bundled() {
        Ok(data) => Some((scenario, data)),
        Err(err) => {
            eprintln!("failed to load reference data: {err}");
            None
        }
    }
}

/// Arguments after the subcommand that are neither flags nor flag values.
fn positional_args(args: &[String]) -> impl Iterator<Item = &str> {
    let mut skip_next = false;
    args.iter().skip(2).filter_map(move |arg| {
        if skip_next {
            skip_next = false;
            return None;
        }
        if arg == "--top" {
            skip_next = true;
            return None;
        }
        if arg.starts_with("--") {
            return None;
        }
        Some(arg.as_str())
    })
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
