use serde::{Deserialize, Serialize};

use crate::artifact::tables::{main_stat_value, validate_level};
use crate::error::{CalcError, CalcResult};
use crate::stats::{Stat, StatTable};

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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Slot {
    Flower,
    Feather,
    Sands,
    Goblet,
    Circlet,
}

const FLOWER_MAIN_STATS: &[Stat] = &[Stat::FlatHP];
const FEATHER_MAIN_STATS: &[Stat] = &[Stat::FlatATK];
const SANDS_MAIN_STATS: &[Stat] = &[
    Stat::HPPercent,
    Stat::ATKPercent,
    Stat::DEFPercent,
    Stat::ElementalMastery,
    Stat::EnergyRecharge,
];
const GOBLET_MAIN_STATS: &[Stat] = &[
    Stat::HPPercent,
    Stat::ATKPercent,
    Stat::DEFPercent,
    Stat::ElementalMastery,
    Stat::PyroDMGBonus,
    Stat::HydroDMGBonus,
    Stat::ElectroDMGBonus,
    Stat::CryoDMGBonus,
    Stat::AnemoDMGBonus,
    Stat::GeoDMGBonus,
    Stat::DendroDMGBonus,
    Stat::PhysicalDMGBonus,
];
const CIRCLET_MAIN_STATS: &[Stat] = &[
    Stat::HPPercent,
    Stat::ATKPercent,
    Stat::DEFPercent,
    Stat::ElementalMastery,
    Stat::CritRate,
    Stat::CritDMG,
    Stat::HealingBonus,
];

impl Slot {
    /// Main stats a piece in this slot may carry, in search enumeration order.
    pub fn legal_main_stats(self) -> &'static [Stat] {
        match self {
            Self::Flower => FLOWER_MAIN_STATS,
            Self::Feather => FEATHER_MAIN_STATS,
            Self::Sands => SANDS_MAIN_STATS,
            Self::Goblet => GOBLET_MAIN_STATS,
            Self::Circlet => CIRCLET_MAIN_STATS,
        }
    }

    pub fn allows(self, stat: Stat) -> bool {
        self.legal_main_stats().contains(&stat)
    }
}

/// A single artifact: rarity, level and main stat. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactPiece {
    rarity: u8,
    level: u8,
    main_stat: Stat,
}

impl ArtifactPiece {
    pub fn new(rarity: u8, level: u8, main_stat: Stat) -> CalcResult<Self> {
        validate_level(rarity, level)?;
        // Also rejects stats that no slot can carry as a main stat.
        main_stat_value(rarity, level, main_stat)?;
        Ok(Self {
            rarity,
            level,
            main_stat,
        })
    }

    /// Constructs a piece and checks it is legal for `slot`.
    pub fn for_slot(slot: Slot, rarity: u8, level: u8, main_stat: Stat) -> CalcResult<Self> {
        if !slot.allows(main_stat) {
            return Err(CalcError::InvalidMainStat {
                stat: main_stat,
                slot: Some(slot),
            });
        }
        Self::new(rarity, level, main_stat)
    }

    pub fn rarity(&self) -> u8 {
        self.rarity
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn main_stat(&self) -> Stat {
        self.main_stat
    }

    pub fn main_stat_value(&self) -> f64 {
        // Validated at construction.
        main_stat_value(self.rarity, self.level, self.main_stat).unwrap_or(0.0)
    }

    /// Substat upgrades this piece can receive: one per four levels.
    pub fn upgrade_rolls(&self) -> u32 {
        u32::from(self.level / 4)
    }

    pub fn stat_table(&self) -> StatTable {
        StatTable::of(&[(self.main_stat, self.main_stat_value())])
    }
}

/// The five equipped pieces, each checked against its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    pub flower: ArtifactPiece,
    pub feather: ArtifactPiece,
    pub sands: ArtifactPiece,
    pub goblet: ArtifactPiece,
    pub circlet: ArtifactPiece,
}

impl ArtifactSet {
    pub fn new(
        flower: ArtifactPiece,
        feather: ArtifactPiece,
        sands: ArtifactPiece,
        goblet: ArtifactPiece,
        circlet: ArtifactPiece,
    ) -> CalcResult<Self> {
        let set = Self {
            flower,
            feather,
            sands,
            goblet,
            circlet,
        };
        for (slot, piece) in set.slots() {
            if !slot.allows(piece.main_stat) {
                return Err(CalcError::InvalidMainStat {
                    stat: piece.main_stat,
                    slot: Some(slot),
                });
            }
        }
        Ok(set)
    }

    /// Five pieces of one rarity and level with the given variable main stats.
    pub fn uniform(
        rarity: u8,
        level: u8,
        sands: Stat,
        goblet: Stat,
        circlet: Stat,
    ) -> CalcResult<Self> {
        Self::new(
            ArtifactPiece::for_slot(Slot::Flower, rarity, level, Stat::FlatHP)?,
            ArtifactPiece::for_slot(Slot::Feather, rarity, level, Stat::FlatATK)?,
            ArtifactPiece::for_slot(Slot::Sands, rarity, level, sands)?,
            ArtifactPiece::for_slot(Slot::Goblet, rarity, level, goblet)?,
            ArtifactPiece::for_slot(Slot::Circlet, rarity, level, circlet)?,
        )
    }

    pub fn slots(&self) -> [(Slot, ArtifactPiece); 5] {
        [
            (Slot::Flower, self.flower),
            (Slot::Feather, self.feather),
            (Slot::Sands, self.sands),
            (Slot::Goblet, self.goblet),
            (Slot::Circlet, self.circlet),
        ]
    }

    pub fn pieces(&self) -> [ArtifactPiece; 5] {
        [
            self.flower,
            self.feather,
            self.sands,
            self.goblet,
            self.circlet,
        ]
    }
}
