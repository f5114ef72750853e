use serde::{Deserialize, Serialize};

use crate::combat::formulas::{
    amplifier_multiplier, avg_crit_multiplier, def_multiplier, res_multiplier, total_stat,
    DamageFactors,
};
use crate::error::{CalcError, CalcResult};
use crate::stats::{Amplifier, BaseScaling, DamageType, Element, Stat, StatTable};

/// Attacker level assumed by [calculate_damage].
pub const CHARACTER_LEVEL: u32 = 90;

/// The target a damage instance lands on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub level: u32,
    pub base_resistance: f64,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            level: 100,
            base_resistance: 0.1,
        }
    }
}

/// One fixed-formula hit: the six parameters of [calculate_damage] bundled as a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInstance {
    pub element: Element,
    pub damage_type: DamageType,
    pub scaling: BaseScaling,
    #[serde(default)]
    pub amplifier: Amplifier,
    #[serde(default = "default_instances")]
    pub instances: f64,
    pub motion_value: f64,
}

fn default_instances() -> f64 {
    1.0
}

impl DamageInstance {
    /// Single unamplified hit.
    pub fn new(
        element: Element,
        damage_type: DamageType,
        scaling: BaseScaling,
        motion_value: f64,
    ) -> Self {
        Self {
            element,
            damage_type,
            scaling,
            amplifier: Amplifier::None,
            instances: 1.0,
            motion_value,
        }
    }

    pub fn with_amplifier(mut self, amplifier: Amplifier) -> Self {
        self.amplifier = amplifier;
        self
    }

    pub fn with_instances(mut self, instances: f64) -> Self {
        self.instances = instances;
        self
    }

    /// Rejects an amplifying reaction on an element that cannot trigger one.
    pub fn validate(&self) -> CalcResult<()> {
        if self.amplifier.applies_to(self.element) {
            Ok(())
        } else {
            Err(CalcError::InvalidAmplifier {
                amplifier: self.amplifier,
                element: self.element,
            })
        }
    }

    pub fn damage(&self, stats: &StatTable) -> f64 {
        self.damage_against(&Enemy::default(), stats)
    }

    pub fn damage_against(&self, enemy: &Enemy, stats: &StatTable) -> f64 {
        self.factors(enemy, stats).damage()
    }

    /// Resolves every multiplier of the formula without combining them.
    pub fn factors(&self, enemy: &Enemy, stats: &StatTable) -> DamageFactors {
        let bonus_of = |stat: Option<Stat>| stat.map_or(0.0, |stat| stats.get(stat));

        let total_dmg_bonus = stats.get(Stat::DMGBonus)
            + stats.get(Stat::ElementalDMGBonus)
            + bonus_of(self.element.dmg_bonus())
            + bonus_of(self.damage_type.dmg_bonus());

        let amplifier = match self.amplifier {
            Amplifier::None => 1.0,
            amplifier => amplifier_multiplier(
                amplifier.coefficient(),
                stats.get(Stat::ElementalMastery),
                stats.get(Stat::ReactionBonus),
            ),
        };

        DamageFactors {
            instances: self.instances,
            total_scaling_stat: total_stat(self.scaling, stats),
            motion_value: self.motion_value,
            base_dmg_multiplier: 1.0,
            additive_base_dmg_bonus: 0.0,
            avg_crit_multiplier: avg_crit_multiplier(stats),
            total_dmg_bonus,
            dmg_reduction_target: 0.0,
            def_multiplier: def_multiplier(
                CHARACTER_LEVEL,
                enemy.level,
                stats.get(Stat::DefReduction),
                stats.get(Stat::DefIgnore),
            ),
            res_multiplier: res_multiplier(
                enemy.base_resistance,
                bonus_of(self.element.resistance_reduction()),
            ),
            amplifier_multiplier: amplifier,
        }
    }
}

/// Expected damage of one action against the default enemy.
///
/// `buffs` are merged into a private copy of `stats`; neither input is modified.
#[allow(clippy::too_many_arguments)]
pub fn calculate_damage(
    element: Element,
    damage_type: DamageType,
    scaling: BaseScaling,
    amplifier: Amplifier,
    instances: f64,
    motion_value: f64,
    stats: &StatTable,
    buffs: Option<&StatTable>,
) -> f64 {
    calculate_damage_against(
        &Enemy::default(),
        element,
        damage_type,
        scaling,
        amplifier,
        instances,
        motion_value,
        stats,
        buffs,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_damage_against(
    enemy: &Enemy,
    element: Element,
    damage_type: DamageType,
    scaling: BaseScaling,
    amplifier: Amplifier,
    instances: f64,
    motion_value: f64,
    stats: &StatTable,
    buffs: Option<&StatTable>,
) -> f64 {
    let instance = DamageInstance {
        element,
        damage_type,
        scaling,
        amplifier,
        instances,
        motion_value,
    };
    match buffs {
        Some(buffs) => instance.damage_against(enemy, &stats.merged(buffs)),
        None => instance.damage_against(enemy, stats),
    }
}
