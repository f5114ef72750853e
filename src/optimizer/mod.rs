pub mod main_stats;
pub mod ranking;
pub mod substats;

pub use main_stats::{
    evaluate_main_stat_candidates, evaluate_main_stat_candidates_parallel,
    global_main_stat_optimizer, global_main_stat_optimizer_parallel, main_stat_candidates,
    MainStatResult, MainStatSelection, REFERENCE_LEVEL, REFERENCE_RARITY,
};
pub use ranking::{rank_main_stat_combinations, rank_results};
pub use substats::{
    optimize_substats, relu_heuristic, stat_gradients, substat_optimizer, SubstatOutcome,
    SubstatSummary,
};

use crate::artifact::ArtifactSet;
use crate::error::CalcResult;
use crate::rotation::Rotation;
use crate::stats::StatTable;

/// Main stats first, then substats on five-star level-20 pieces carrying them.
#[derive(Debug, Clone)]
pub struct FullOptimization {
    pub main_stats: MainStatSelection,
    pub substats: SubstatOutcome,
}

impl FullOptimization {
    /// `base` plus every optimized main stat and substat.
    pub fn final_stats(&self, base: &StatTable) -> StatTable {
        base.merged(&self.substats.builder.build())
    }
}

pub fn optimize_artifacts(
    base: &StatTable,
    rotation: &Rotation,
    energy_recharge_requirement: f64,
) -> CalcResult<FullOptimization> {
    let main_stats = global_main_stat_optimizer_parallel(base, rotation);
    let set = ArtifactSet::uniform(
        REFERENCE_RARITY,
        REFERENCE_LEVEL,
        main_stats.sands,
        main_stats.goblet,
        main_stats.circlet,
    )?;
    let substats = optimize_substats(base, rotation, &set, energy_recharge_requirement)?;
    Ok(FullOptimization {
        main_stats,
        substats,
    })
}
