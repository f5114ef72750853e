use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifact::{sub_stat_value, ArtifactBuilder, ArtifactSet, RollQuality, SUB_STATS};
use crate::error::CalcResult;
use crate::rotation::Rotation;
use crate::stats::{Stat, StatTable};

/// Quality of every roll the allocator places.
pub const ALLOCATION_QUALITY: RollQuality = RollQuality::Avg;

/// Finite-difference slope of rotation damage with respect to each stat.
///
/// Each stat is perturbed by its own step; a zero step yields a zero gradient.
pub fn stat_gradients(
    base: &StatTable,
    rotation: &Rotation,
    slopes: &BTreeMap<Stat, f64>,
) -> BTreeMap<Stat, f64> {
    let baseline = rotation.evaluate(base);
    slopes
        .iter()
        .map(|(&stat, &slope)| {
            if slope == 0.0 {
                return (stat, 0.0);
            }
            let mut perturbed = base.clone();
            perturbed.add(stat, slope);
            (stat, (rotation.evaluate(&perturbed) - baseline) / slope)
        })
        .collect()
}

/// Stats whose gradient is strictly positive.
pub fn relu_heuristic(
    base: &StatTable,
    rotation: &Rotation,
    slopes: &BTreeMap<Stat, f64>,
) -> BTreeSet<Stat> {
    positive_stats(&stat_gradients(base, rotation, slopes))
}

fn positive_stats(gradients: &BTreeMap<Stat, f64>) -> BTreeSet<Stat> {
    gradients
        .iter()
        .filter(|(_, gradient)| **gradient > 0.0)
        .map(|(stat, _)| *stat)
        .collect()
}

/// Outcome of a substat allocation run.
#[derive(Debug, Clone)]
pub struct SubstatOutcome {
    /// Rolls placed by the allocator, excluding the preset's seeded rolls.
    pub allocated: BTreeMap<Stat, u32>,
    /// Builder holding seeded and allocated rolls.
    pub builder: ArtifactBuilder,
    /// Whether the energy recharge floor was reached.
    pub energy_recharge_met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubstatSummary {
    pub allocated: BTreeMap<Stat, u32>,
    pub rolls_used: u32,
    pub max_rolls: u32,
    pub energy_recharge_met: bool,
}

impl SubstatOutcome {
    pub fn summary(&self) -> SubstatSummary {
        SubstatSummary {
            allocated: self.allocated.clone(),
            rolls_used: self.builder.current_rolls(),
            max_rolls: self.builder.max_rolls(),
            energy_recharge_met: self.energy_recharge_met,
        }
    }
}

/// Greedy substat allocation under the KQM preset.
///
/// Rolls energy recharge until `energy_recharge_requirement` is met (or ER is capped), then
/// repeatedly rolls the substat with the greatest positive damage gain per roll. Ties go to
/// the earlier substat in [Stat] order. Stops when the budget is spent or no stat helps.
pub fn optimize_substats(
    base: &StatTable,
    rotation: &Rotation,
    set: &ArtifactSet,
    energy_recharge_requirement: f64,
) -> CalcResult<SubstatOutcome> {
    let mut builder = ArtifactBuilder::kqm(*set);
    let seeded = builder.roll_counts();
    let rarity = builder.roll_rarity();

    let roll_values: BTreeMap<Stat, f64> = SUB_STATS
        .iter()
        .map(|&stat| -> CalcResult<(Stat, f64)> {
            Ok((stat, sub_stat_value(rarity, stat)? * ALLOCATION_QUALITY.multiplier()))
        })
        .collect::<CalcResult<_>>()?;

    while builder.rolls_left() > 0 {
        let current = base.merged(&builder.build());

        if current.get(Stat::EnergyRecharge) < energy_recharge_requirement
            && builder.available_rolls(Stat::EnergyRecharge, rarity) > 0
        {
            builder.roll(Stat::EnergyRecharge, ALLOCATION_QUALITY, rarity, 1)?;
            debug!(
                energy_recharge = current.get(Stat::EnergyRecharge),
                requirement = energy_recharge_requirement,
                "rolled energy recharge toward floor"
            );
            continue;
        }

        let slopes: BTreeMap<Stat, f64> = roll_values
            .iter()
            .filter(|(stat, _)| builder.available_rolls(**stat, rarity) > 0)
            .map(|(stat, value)| (*stat, *value))
            .collect();
        let gradients = stat_gradients(&current, rotation, &slopes);
        let candidates = positive_stats(&gradients);

        let mut best: Option<(Stat, f64)> = None;
        for stat in SUB_STATS.iter().filter(|stat| candidates.contains(stat)) {
            // Ranked by gain per roll, not by raw gradient.
            let gain = gradients.get(stat).copied().unwrap_or(0.0)
                * slopes.get(stat).copied().unwrap_or(0.0);
            if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((*stat, gain));
            }
        }

        let Some((stat, gain)) = best else {
            debug!("no substat improves damage; stopping early");
            break;
        };
        builder.roll(stat, ALLOCATION_QUALITY, rarity, 1)?;
        debug!(stat = %stat, gain, rolls_left = builder.rolls_left(), "allocated substat roll");
    }

    let final_er = base.merged(&builder.build()).get(Stat::EnergyRecharge);
    let energy_recharge_met = final_er >= energy_recharge_requirement;
    if !energy_recharge_met {
        warn!(
            energy_recharge = final_er,
            requirement = energy_recharge_requirement,
            "energy recharge floor cannot be met with the available rolls"
        );
    }

    let allocated: BTreeMap<Stat, u32> = builder
        .roll_counts()
        .into_iter()
        .map(|(stat, count)| (stat, count - seeded.get(&stat).copied().unwrap_or(0).min(count)))
        .filter(|(_, count)| *count > 0)
        .collect();
    info!(
        rolls = allocated.values().sum::<u32>(),
        energy_recharge_met, "substat allocation finished"
    );

    Ok(SubstatOutcome {
        allocated,
        builder,
        energy_recharge_met,
    })
}

/// Stat-to-roll-count mapping of [optimize_substats]; positive entries only.
pub fn substat_optimizer(
    base: &StatTable,
    rotation: &Rotation,
    set: &ArtifactSet,
    energy_recharge_requirement: f64,
) -> CalcResult<BTreeMap<Stat, u32>> {
    optimize_substats(base, rotation, set, energy_recharge_requirement)
        .map(|outcome| outcome.allocated)
}
