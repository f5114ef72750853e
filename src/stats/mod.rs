//! Stat identifiers and the additive [StatTable] they key.
//!
//! Declaration order of [Stat] is significant: optimizers enumerate and break ties in this
//! order, so reordering variants changes observable results.

pub mod table;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

pub use table::StatTable;

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
    EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum Stat {
    BaseHP,
    FlatHP,
    HPPercent,
    BaseATK,
    FlatATK,
    ATKPercent,
    BaseDEF,
    FlatDEF,
    DEFPercent,
    ElementalMastery,
    CritRate,
    CritDMG,
    EnergyRecharge,
    DMGBonus,
    ElementalDMGBonus,
    PyroDMGBonus,
    CryoDMGBonus,
    GeoDMGBonus,
    DendroDMGBonus,
    ElectroDMGBonus,
    HydroDMGBonus,
    AnemoDMGBonus,
    PhysicalDMGBonus,
    NormalATKDMGBonus,
    ChargeATKDMGBonus,
    PlungeATKDMGBonus,
    SkillDMGBonus,
    BurstDMGBonus,
    HealingBonus,
    None,
    // Not shown on the character sheet; supplied by buffs and debuffs.
    ReactionBonus,
    DefReduction,
    DefIgnore,
    PyroResistanceReduction,
    HydroResistanceReduction,
    ElectroResistanceReduction,
    CryoResistanceReduction,
    AnemoResistanceReduction,
    GeoResistanceReduction,
    DendroResistanceReduction,
    PhysicalResistanceReduction,
}

impl Stat {
    /// Every stat in declaration order.
    pub fn all() -> impl Iterator<Item = Stat> {
        Stat::iter()
    }

    /// Elemental (non-physical) damage bonus variants.
    pub fn is_elemental_dmg_bonus(self) -> bool {
        matches!(
            self,
            Stat::PyroDMGBonus
                | Stat::CryoDMGBonus
                | Stat::GeoDMGBonus
                | Stat::DendroDMGBonus
                | Stat::ElectroDMGBonus
                | Stat::HydroDMGBonus
                | Stat::AnemoDMGBonus
        )
    }
}

/// Scenario files name stats in any case, same as [str::parse].
impl TryFrom<String> for Stat {
    type Error = strum::ParseError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Pyro,
    Hydro,
    Electro,
    Anemo,
    Geo,
    Dendro,
    Cryo,
    Physical,
    None,
}

impl Element {
    /// Damage bonus stat matching this element, if any.
    pub fn dmg_bonus(self) -> Option<Stat> {
        match self {
            Self::Pyro => Some(Stat::PyroDMGBonus),
            Self::Hydro => Some(Stat::HydroDMGBonus),
            Self::Electro => Some(Stat::ElectroDMGBonus),
            Self::Anemo => Some(Stat::AnemoDMGBonus),
            Self::Geo => Some(Stat::GeoDMGBonus),
            Self::Dendro => Some(Stat::DendroDMGBonus),
            Self::Cryo => Some(Stat::CryoDMGBonus),
            Self::Physical => Some(Stat::PhysicalDMGBonus),
            Self::None => Option::None,
        }
    }

    pub fn resistance_reduction(self) -> Option<Stat> {
        match self {
            Self::Pyro => Some(Stat::PyroResistanceReduction),
            Self::Hydro => Some(Stat::HydroResistanceReduction),
            Self::Electro => Some(Stat::ElectroResistanceReduction),
            Self::Anemo => Some(Stat::AnemoResistanceReduction),
            Self::Geo => Some(Stat::GeoResistanceReduction),
            Self::Dendro => Some(Stat::DendroResistanceReduction),
            Self::Cryo => Some(Stat::CryoResistanceReduction),
            Self::Physical => Some(Stat::PhysicalResistanceReduction),
            Self::None => Option::None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DamageType {
    Normal,
    Charged,
    Plunging,
    Skill,
    Burst,
    None,
}

impl DamageType {
    pub fn dmg_bonus(self) -> Option<Stat> {
        match self {
            Self::Normal => Some(Stat::NormalATKDMGBonus),
            Self::Charged => Some(Stat::ChargeATKDMGBonus),
            Self::Plunging => Some(Stat::PlungeATKDMGBonus),
            Self::Skill => Some(Stat::SkillDMGBonus),
            Self::Burst => Some(Stat::BurstDMGBonus),
            Self::None => Option::None,
        }
    }
}

/// Which total attribute a damage instance scales from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum BaseScaling {
    ATK,
    DEF,
    HP,
}

/// Amplifying reaction applied to a damage instance.
///
/// `Forward` is the strong direction (e.g. pyro onto hydro), `Reverse` the weak one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Amplifier {
    Forward,
    Reverse,
    #[default]
    None,
}

impl Amplifier {
    /// Base reaction coefficient before elemental mastery and reaction bonus.
    pub fn coefficient(self) -> f64 {
        match self {
            Self::Forward => 2.0,
            Self::Reverse => 1.5,
            Self::None => 1.0,
        }
    }

    /// Only pyro, hydro, cryo and anemo hits can trigger an amplifying reaction.
    pub fn applies_to(self, element: Element) -> bool {
        match self {
            Self::None => true,
            Self::Forward | Self::Reverse => matches!(
                element,
                Element::Pyro | Element::Hydro | Element::Cryo | Element::Anemo
            ),
        }
    }
}
