use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::artifact::piece::ArtifactSet;
use crate::artifact::tables::{is_valid_substat, sub_stat_value, validate_rarity, SUB_STATS};
use crate::error::{CalcError, CalcResult};
use crate::stats::{Stat, StatTable};

/// Fraction of a substat's max roll value granted by a single roll.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RollQuality {
    Low,
    Mid,
    High,
    Max,
    /// Mean of the four tiers.
    Avg,
}

impl RollQuality {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.7,
            Self::Mid => 0.8,
            Self::High => 0.9,
            Self::Max => 1.0,
            Self::Avg => 0.85,
        }
    }
}

/// Roll budget rules.
///
/// `Default` mirrors in-game upgrade counts. `Kqm` is the community-standard preset with two
/// fixed average rolls in every substat and a small fluid pool per piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuilderProfile {
    #[default]
    Default,
    Kqm,
}

const KQM_FIXED_ROLLS_PER_STAT: u32 = 2;
/// Per-stat ceiling added by each piece whose main stat differs.
const KQM_CEILING_PER_PIECE: u32 = 2;

/// Each piece's share of the total roll budget on top of the fixed rolls.
fn kqm_fluid_budget(rarity: u8) -> u32 {
    match rarity {
        5 => 4,
        4 => 2,
        _ => 0,
    }
}

type RollKey = (Stat, RollQuality, u8);

/// Five pieces plus a ledger of applied substat rolls.
///
/// Roll counts are the single source of truth; the substat pool is recomputed from them, so
/// `unroll` restores the pool exactly.
#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    set: ArtifactSet,
    profile: BuilderProfile,
    rolls: BTreeMap<RollKey, u32>,
}

impl ArtifactBuilder {
    pub fn new(set: ArtifactSet) -> Self {
        Self::with_profile(set, BuilderProfile::Default)
    }

    pub fn kqm(set: ArtifactSet) -> Self {
        Self::with_profile(set, BuilderProfile::Kqm)
    }

    pub fn with_profile(set: ArtifactSet, profile: BuilderProfile) -> Self {
        let mut builder = Self {
            set,
            profile,
            rolls: BTreeMap::new(),
        };
        if profile == BuilderProfile::Kqm {
            let rarity = builder.roll_rarity();
            for stat in SUB_STATS {
                builder
                    .rolls
                    .insert((stat, RollQuality::Avg, rarity), KQM_FIXED_ROLLS_PER_STAT);
            }
        }
        builder
    }

    pub fn set(&self) -> &ArtifactSet {
        &self.set
    }

    pub fn profile(&self) -> BuilderProfile {
        self.profile
    }

    /// Rarity used for seeded and optimizer rolls: the highest among the five pieces.
    pub fn roll_rarity(&self) -> u8 {
        self.set
            .pieces()
            .iter()
            .map(|piece| piece.rarity())
            .max()
            .unwrap_or(5)
    }

    pub fn main_stats(&self) -> StatTable {
        self.set
            .pieces()
            .iter()
            .map(|piece| (piece.main_stat(), piece.main_stat_value()))
            .collect()
    }

    pub fn sub_stats(&self) -> StatTable {
        self.rolls
            .iter()
            .map(|(&(stat, quality, rarity), &count)| {
                // Keys are validated before insertion.
                let value = sub_stat_value(rarity, stat).unwrap_or(0.0);
                (stat, value * quality.multiplier() * f64::from(count))
            })
            .collect()
    }

    pub fn build(&self) -> StatTable {
        self.main_stats().merged(&self.sub_stats())
    }

    /// Ceiling on rolls of `stat` at `rarity`, counting only pieces of that rarity.
    pub fn substat_constraint(&self, stat: Stat, rarity: u8) -> u32 {
        let eligible = self
            .set
            .pieces()
            .into_iter()
            .filter(|piece| piece.rarity() == rarity && piece.main_stat() != stat);

        match self.profile {
            BuilderProfile::Default => eligible.map(|piece| piece.upgrade_rolls() + 1).sum(),
            BuilderProfile::Kqm => {
                KQM_FIXED_ROLLS_PER_STAT + KQM_CEILING_PER_PIECE * eligible.count() as u32
            }
        }
    }

    pub fn max_rolls(&self) -> u32 {
        let pieces = self.set.pieces();
        match self.profile {
            BuilderProfile::Default => pieces
                .iter()
                .map(|piece| u32::from(piece.rarity() - 1) + piece.upgrade_rolls())
                .sum(),
            BuilderProfile::Kqm => {
                KQM_FIXED_ROLLS_PER_STAT * SUB_STATS.len() as u32
                    + pieces
                        .iter()
                        .map(|piece| kqm_fluid_budget(piece.rarity()))
                        .sum::<u32>()
            }
        }
    }

    pub fn current_rolls(&self) -> u32 {
        self.rolls.values().sum()
    }

    pub fn current_rolls_for(&self, stat: Stat) -> u32 {
        self.rolls
            .iter()
            .filter(|((rolled, _, _), _)| *rolled == stat)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn current_rolls_for_rarity(&self, stat: Stat, rarity: u8) -> u32 {
        self.rolls
            .iter()
            .filter(|((rolled, _, at), _)| *rolled == stat && *at == rarity)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn rolls_left(&self) -> u32 {
        self.max_rolls().saturating_sub(self.current_rolls())
    }

    /// Rolls of `stat` at `rarity` still allowed by both the per-stat ceiling and the total budget.
    pub fn available_rolls(&self, stat: Stat, rarity: u8) -> u32 {
        let ceiling = self
            .substat_constraint(stat, rarity)
            .saturating_sub(self.current_rolls_for_rarity(stat, rarity));
        ceiling.min(self.rolls_left())
    }

    /// Applies `count` rolls or none at all.
    pub fn roll(
        &mut self,
        stat: Stat,
        quality: RollQuality,
        rarity: u8,
        count: u32,
    ) -> CalcResult<&mut Self> {
        validate_rarity(rarity)?;
        if !is_valid_substat(stat) {
            return Err(CalcError::InvalidSubStat { stat });
        }

        let available = self.available_rolls(stat, rarity);
        if count > available {
            return Err(CalcError::BudgetExceeded {
                stat,
                requested: count,
                available,
            });
        }

        if count > 0 {
            *self.rolls.entry((stat, quality, rarity)).or_insert(0) += count;
        }
        Ok(self)
    }

    /// Exact inverse of [ArtifactBuilder::roll] for the same arguments.
    pub fn unroll(
        &mut self,
        stat: Stat,
        quality: RollQuality,
        rarity: u8,
        count: u32,
    ) -> CalcResult<&mut Self> {
        validate_rarity(rarity)?;
        if !is_valid_substat(stat) {
            return Err(CalcError::InvalidSubStat { stat });
        }

        let key = (stat, quality, rarity);
        let applied = self.rolls.get(&key).copied().unwrap_or(0);
        if count > applied {
            return Err(CalcError::RollUnderflow {
                stat,
                requested: count,
                applied,
            });
        }

        if applied == count {
            self.rolls.remove(&key);
        } else {
            self.rolls.insert(key, applied - count);
        }
        Ok(self)
    }

    /// Roll counts per stat, summed over quality and rarity.
    pub fn roll_counts(&self) -> BTreeMap<Stat, u32> {
        let mut counts = BTreeMap::new();
        for (&(stat, _, _), &count) in &self.rolls {
            *counts.entry(stat).or_insert(0) += count;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::piece::{ArtifactPiece, ArtifactSet};
    use crate::error::ErrorKind;

    fn five_star_set(sands: Stat, goblet: Stat, circlet: Stat) -> ArtifactSet {
        ArtifactSet::uniform(5, 20, sands, goblet, circlet).expect("valid set")
    }

    fn neutral_set() -> ArtifactSet {
        five_star_set(Stat::HPPercent, Stat::HPPercent, Stat::HPPercent)
    }

    #[test]
    fn quality_scale_is_ordered() {
        assert!(RollQuality::Low < RollQuality::Mid);
        assert!(RollQuality::Mid < RollQuality::High);
        assert!(RollQuality::High < RollQuality::Max);
        let mean = [
            RollQuality::Low,
            RollQuality::Mid,
            RollQuality::High,
            RollQuality::Max,
        ]
        .iter()
        .map(|quality| quality.multiplier())
        .sum::<f64>()
            / 4.0;
        assert!((RollQuality::Avg.multiplier() - mean).abs() < 1e-12);
    }

    #[test]
    fn default_constraint_drops_per_conflict() {
        let builder = ArtifactBuilder::new(five_star_set(
            Stat::ATKPercent,
            Stat::ATKPercent,
            Stat::CritRate,
        ));
        assert_eq!(builder.substat_constraint(Stat::CritDMG, 5), 30);
        assert_eq!(builder.substat_constraint(Stat::CritRate, 5), 24);
        assert_eq!(builder.substat_constraint(Stat::ATKPercent, 5), 18);
        assert_eq!(builder.substat_constraint(Stat::CritDMG, 4), 0);
        assert_eq!(builder.max_rolls(), 45);
        assert_eq!(builder.current_rolls(), 0);
    }

    #[test]
    fn kqm_constraint_and_seeding() {
        let builder = ArtifactBuilder::kqm(five_star_set(
            Stat::ATKPercent,
            Stat::ATKPercent,
            Stat::CritRate,
        ));
        assert_eq!(builder.substat_constraint(Stat::CritDMG, 5), 12);
        assert_eq!(builder.substat_constraint(Stat::CritRate, 5), 10);
        assert_eq!(builder.substat_constraint(Stat::ATKPercent, 5), 8);
        assert_eq!(builder.max_rolls(), 40);
        assert_eq!(builder.profile(), BuilderProfile::Kqm);
        assert_eq!(builder.current_rolls(), 20);
        assert_eq!(builder.rolls_left(), 20);
        for stat in SUB_STATS {
            assert_eq!(builder.current_rolls_for(stat), 2);
        }
        let expected = sub_stat_value(5, Stat::CritRate).expect("substat") * 0.85 * 2.0;
        assert!((builder.sub_stats().get(Stat::CritRate) - expected).abs() < 1e-12);
    }

    #[test]
    fn four_star_budget() {
        let piece = |stat| ArtifactPiece::new(4, 16, stat).expect("valid piece");
        let set = ArtifactSet::new(
            piece(Stat::FlatHP),
            piece(Stat::FlatATK),
            piece(Stat::ATKPercent),
            piece(Stat::PyroDMGBonus),
            piece(Stat::CritRate),
        )
        .expect("valid set");
        assert_eq!(ArtifactBuilder::new(set).max_rolls(), 35);
        assert_eq!(ArtifactBuilder::kqm(set).max_rolls(), 30);
        assert_eq!(ArtifactBuilder::new(set).substat_constraint(Stat::CritDMG, 4), 25);
    }

    #[test]
    fn roll_then_unroll_restores_state() {
        let mut builder = ArtifactBuilder::kqm(neutral_set());
        let before_pool = builder.sub_stats();
        let before_total = builder.current_rolls();
        let before_stat = builder.current_rolls_for(Stat::CritDMG);

        builder
            .roll(Stat::CritDMG, RollQuality::High, 5, 3)
            .expect("roll within budget");
        assert_eq!(builder.current_rolls(), before_total + 3);
        builder
            .unroll(Stat::CritDMG, RollQuality::High, 5, 3)
            .expect("unroll of applied rolls");

        assert_eq!(builder.sub_stats(), before_pool);
        assert_eq!(builder.current_rolls(), before_total);
        assert_eq!(builder.current_rolls_for(Stat::CritDMG), before_stat);
    }

    #[test]
    fn over_budget_roll_leaves_builder_untouched() {
        let mut builder = ArtifactBuilder::kqm(neutral_set());
        let before = builder.build();

        let err = builder
            .roll(Stat::CritRate, RollQuality::Avg, 5, 11)
            .unwrap_err();
        assert!(matches!(
            err,
            CalcError::BudgetExceeded {
                requested: 11,
                available: 10,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Budget);
        assert_eq!(builder.build(), before);
        assert_eq!(builder.current_rolls(), 20);
    }

    #[test]
    fn total_budget_caps_across_stats() {
        let mut builder = ArtifactBuilder::kqm(neutral_set());
        builder
            .roll(Stat::CritRate, RollQuality::Avg, 5, 10)
            .expect("ceiling reached exactly");
        builder
            .roll(Stat::CritDMG, RollQuality::Avg, 5, 10)
            .expect("budget reached exactly");
        assert_eq!(builder.rolls_left(), 0);
        assert_eq!(builder.available_rolls(Stat::ATKPercent, 5), 0);
        assert!(builder.roll(Stat::ATKPercent, RollQuality::Avg, 5, 1).is_err());
    }

    #[test]
    fn zero_count_roll_leaves_no_ledger_entry() {
        let mut builder = ArtifactBuilder::new(neutral_set());
        assert_eq!(builder.profile(), BuilderProfile::Default);
        builder
            .roll(Stat::CritDMG, RollQuality::Max, 5, 0)
            .expect("empty roll is allowed");
        assert!(builder.roll_counts().is_empty());
        assert_eq!(builder.current_rolls(), 0);
        assert!(builder.sub_stats().is_empty());
    }

    #[test]
    fn unroll_cannot_go_negative() {
        let mut builder = ArtifactBuilder::new(neutral_set());
        let err = builder
            .unroll(Stat::CritRate, RollQuality::Max, 5, 1)
            .unwrap_err();
        assert!(matches!(err, CalcError::RollUnderflow { applied: 0, .. }));
        assert_eq!(builder.current_rolls(), 0);
    }

    #[test]
    fn invalid_substats_are_rejected() {
        let mut builder = ArtifactBuilder::new(neutral_set());
        assert!(matches!(
            builder.roll(Stat::PyroDMGBonus, RollQuality::Max, 5, 1),
            Err(CalcError::InvalidSubStat { .. })
        ));
        assert!(matches!(
            builder.roll(Stat::CritRate, RollQuality::Max, 9, 1),
            Err(CalcError::InvalidRarity { rarity: 9 })
        ));
    }

    #[test]
    fn build_combines_main_and_sub_stats() {
        let mut builder = ArtifactBuilder::new(five_star_set(
            Stat::ATKPercent,
            Stat::ATKPercent,
            Stat::CritRate,
        ));
        builder
            .roll(Stat::ATKPercent, RollQuality::Max, 5, 2)
            .expect("roll within budget");
        let built = builder.build();
        assert!((built.get(Stat::ATKPercent) - (0.466 * 2.0 + 0.0583 * 2.0)).abs() < 1e-9);
        assert_eq!(built.get(Stat::FlatHP), 4780.0);
        assert_eq!(builder.roll_counts().get(&Stat::ATKPercent), Some(&2));
    }
}
