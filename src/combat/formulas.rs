//! Closed-form damage formulas.
//!
//! Every function here is pure: stat tables are read, never written.

use crate::stats::{BaseScaling, Stat, StatTable};

/// Elemental mastery weight inside the amplifying-reaction multiplier.
pub const AMPLIFIER_EM_SCALE: f64 = 2.78;
/// Elemental mastery offset inside the amplifying-reaction multiplier.
pub const AMPLIFIER_EM_OFFSET: f64 = 1400.0;
/// Resistance at or above this value switches to the diminishing branch.
pub const HIGH_RESISTANCE_THRESHOLD: f64 = 0.75;

/// Compose `base * (1 + percent) + flat`.
pub fn compose(base: f64, percent: f64, flat: f64) -> f64 {
    base * (1.0 + percent) + flat
}

pub fn total_atk(stats: &StatTable) -> f64 {
    compose(
        stats.get(Stat::BaseATK),
        stats.get(Stat::ATKPercent),
        stats.get(Stat::FlatATK),
    )
}

pub fn total_def(stats: &StatTable) -> f64 {
    compose(
        stats.get(Stat::BaseDEF),
        stats.get(Stat::DEFPercent),
        stats.get(Stat::FlatDEF),
    )
}

pub fn total_hp(stats: &StatTable) -> f64 {
    compose(
        stats.get(Stat::BaseHP),
        stats.get(Stat::HPPercent),
        stats.get(Stat::FlatHP),
    )
}

pub fn total_stat(scaling: BaseScaling, stats: &StatTable) -> f64 {
    match scaling {
        BaseScaling::ATK => total_atk(stats),
        BaseScaling::DEF => total_def(stats),
        BaseScaling::HP => total_hp(stats),
    }
}

/// Expected crit multiplier `1 + CritRate * CritDMG`, with crit rate clamped to `[0, 1]`.
pub fn avg_crit_multiplier(stats: &StatTable) -> f64 {
    let crit_rate = stats.get(Stat::CritRate).clamp(0.0, 1.0);
    1.0 + crit_rate * stats.get(Stat::CritDMG)
}

/// Defense multiplier for an attacker hitting a defender.
///
/// Reduction and ignore are taken as given; values outside `[0, 1]` simply scale the result.
pub fn def_multiplier(
    attacker_level: u32,
    defender_level: u32,
    def_reduction: f64,
    def_ignore: f64,
) -> f64 {
    let attacker = attacker_level as f64 + 100.0;
    let defender = defender_level as f64 + 100.0;
    attacker / (attacker + defender * (1.0 - def_reduction) * (1.0 - def_ignore))
}

/// Resistance multiplier for an enemy's base resistance after reductions.
pub fn res_multiplier(base_resistance: f64, resistance_reduction: f64) -> f64 {
    let resistance = base_resistance - resistance_reduction;
    if resistance < 0.0 {
        1.0 - resistance / 2.0
    } else if resistance < HIGH_RESISTANCE_THRESHOLD {
        1.0 - resistance
    } else {
        1.0 / (4.0 * resistance + 1.0)
    }
}

/// Amplifying-reaction multiplier; `coefficient` is 2.0 forward or 1.5 reverse.
pub fn amplifier_multiplier(coefficient: f64, elemental_mastery: f64, reaction_bonus: f64) -> f64 {
    let em_bonus =
        AMPLIFIER_EM_SCALE * elemental_mastery / (AMPLIFIER_EM_OFFSET + elemental_mastery);
    coefficient * (1.0 + em_bonus + reaction_bonus)
}

/// Every factor of the damage formula, already resolved from stats and the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageFactors {
    pub instances: f64,
    pub total_scaling_stat: f64,
    pub motion_value: f64,
    pub base_dmg_multiplier: f64,
    pub additive_base_dmg_bonus: f64,
    pub avg_crit_multiplier: f64,
    pub total_dmg_bonus: f64,
    pub dmg_reduction_target: f64,
    pub def_multiplier: f64,
    pub res_multiplier: f64,
    pub amplifier_multiplier: f64,
}

impl DamageFactors {
    pub fn damage(&self) -> f64 {
        ((self.total_scaling_stat * self.motion_value) * self.base_dmg_multiplier
            + self.additive_base_dmg_bonus)
            * self.avg_crit_multiplier
            * (1.0 + self.total_dmg_bonus - self.dmg_reduction_target)
            * self.def_multiplier
            * self.res_multiplier
            * self.amplifier_multiplier
            * self.instances
    }
}
