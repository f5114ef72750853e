use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::artifact::{main_stat_value, Slot};
use crate::rotation::Rotation;
use crate::stats::{Stat, StatTable};

/// Rarity every candidate main stat is valued at.
pub const REFERENCE_RARITY: u8 = 5;
/// Level every candidate main stat is valued at.
pub const REFERENCE_LEVEL: u8 = 20;

/// Chosen main stats for the three variable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MainStatSelection {
    pub sands: Stat,
    pub goblet: Stat,
    pub circlet: Stat,
}

impl MainStatSelection {
    pub fn to_array(self) -> [Stat; 3] {
        [self.sands, self.goblet, self.circlet]
    }

    /// Main-stat contribution of the three pieces at the reference rarity and level.
    pub fn stat_table(&self) -> StatTable {
        self.to_array()
            .into_iter()
            // Every legal variable-slot stat has a five-star curve.
            .map(|stat| {
                let value = main_stat_value(REFERENCE_RARITY, REFERENCE_LEVEL, stat).unwrap_or(0.0);
                (stat, value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MainStatResult {
    pub selection: MainStatSelection,
    pub damage: f64,
}

/// All legal (sands, goblet, circlet) combinations: sands outermost, circlet innermost,
/// each slot in its legal-stat order.
pub fn main_stat_candidates() -> Vec<MainStatSelection> {
    let mut candidates = Vec::with_capacity(
        Slot::Sands.legal_main_stats().len()
            * Slot::Goblet.legal_main_stats().len()
            * Slot::Circlet.legal_main_stats().len(),
    );
    for &sands in Slot::Sands.legal_main_stats() {
        for &goblet in Slot::Goblet.legal_main_stats() {
            for &circlet in Slot::Circlet.legal_main_stats() {
                candidates.push(MainStatSelection {
                    sands,
                    goblet,
                    circlet,
                });
            }
        }
    }
    candidates
}

pub fn evaluate_main_stat_candidates(base: &StatTable, rotation: &Rotation) -> Vec<MainStatResult> {
    evaluate_with_parallelism(base, rotation, false)
}

/// Like [evaluate_main_stat_candidates] but spreads candidates across cores via Rayon.
/// Results order matches enumeration order.
pub fn evaluate_main_stat_candidates_parallel(
    base: &StatTable,
    rotation: &Rotation,
) -> Vec<MainStatResult> {
    evaluate_with_parallelism(base, rotation, true)
}

fn evaluate_with_parallelism(
    base: &StatTable,
    rotation: &Rotation,
    parallel: bool,
) -> Vec<MainStatResult> {
    let candidates = main_stat_candidates();

    let evaluate_one = |selection: &MainStatSelection| MainStatResult {
        selection: *selection,
        damage: rotation.evaluate(&base.merged(&selection.stat_table())),
    };

    if parallel {
        candidates.par_iter().map(evaluate_one).collect()
    } else {
        candidates.iter().map(evaluate_one).collect()
    }
}

/// Exhaustive main-stat search; the first candidate with strictly greatest damage wins.
pub fn global_main_stat_optimizer(base: &StatTable, rotation: &Rotation) -> MainStatSelection {
    select_best(evaluate_main_stat_candidates(base, rotation))
}

pub fn global_main_stat_optimizer_parallel(
    base: &StatTable,
    rotation: &Rotation,
) -> MainStatSelection {
    select_best(evaluate_main_stat_candidates_parallel(base, rotation))
}

fn select_best(results: Vec<MainStatResult>) -> MainStatSelection {
    let mut best: Option<MainStatResult> = None;
    for result in results {
        let improves = match &best {
            Some(current) => result.damage > current.damage,
            None => true,
        };
        if improves {
            debug!(
                sands = %result.selection.sands,
                goblet = %result.selection.goblet,
                circlet = %result.selection.circlet,
                damage = result.damage,
                "new best main stats"
            );
            best = Some(result);
        }
    }

    let best = best
        .map(|result| result.selection)
        .unwrap_or(MainStatSelection {
            sands: Stat::ATKPercent,
            goblet: Stat::ATKPercent,
            circlet: Stat::CritRate,
        });
    info!(
        sands = %best.sands,
        goblet = %best.goblet,
        circlet = %best.circlet,
        "main stat search finished"
    );
    best
}
