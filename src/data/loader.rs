//! Load and resolve characters and weapons by name from bundled JSON.
//! Uses data/characters.json and data/weapons.json, embedded at compile time.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::StatProvider;
use crate::error::{CalcError, CalcResult, LookupKind};
use crate::stats::{Element, Stat, StatTable};

const BUNDLED_CHARACTERS: &str = include_str!("../../data/characters.json");
const BUNDLED_WEAPONS: &str = include_str!("../../data/weapons.json");

/// Stats every character has before any gear: 5 % crit rate, 50 % crit damage, 100 % ER.
pub const UNIVERSAL_BASE_STATS: [(Stat, f64); 3] = [
    (Stat::CritRate, 0.05),
    (Stat::CritDMG, 0.5),
    (Stat::EnergyRecharge, 1.0),
];

/// Normalize a string for lookup: lowercase, collapse spaces/underscores.
pub fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub element: Element,
    /// Final-ascension stats, universal base stats included once loaded.
    pub stats: StatTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub stats: StatTable,
}

/// Immutable character and weapon dataset keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    characters: BTreeMap<String, CharacterRecord>,
    weapons: BTreeMap<String, WeaponRecord>,
}

impl ReferenceData {
    /// Parses JSON arrays of character and weapon records.
    pub fn from_json(characters: &str, weapons: &str) -> CalcResult<Self> {
        let characters: Vec<CharacterRecord> = serde_json::from_str(characters)
            .map_err(|err| CalcError::MalformedData(format!("characters: {err}")))?;
        let weapons: Vec<WeaponRecord> = serde_json::from_str(weapons)
            .map_err(|err| CalcError::MalformedData(format!("weapons: {err}")))?;
        Ok(Self::from_records(characters, weapons))
    }

    pub fn from_records(characters: Vec<CharacterRecord>, weapons: Vec<WeaponRecord>) -> Self {
        let characters = characters
            .into_iter()
            .map(|mut record| {
                record.stats.extend(UNIVERSAL_BASE_STATS);
                (normalize_lookup(&record.name), record)
            })
            .collect();
        let weapons = weapons
            .into_iter()
            .map(|record| (normalize_lookup(&record.name), record))
            .collect();
        Self {
            characters,
            weapons,
        }
    }

    pub fn character(&self, name: &str) -> CalcResult<&CharacterRecord> {
        self.characters
            .get(&normalize_lookup(name))
            .ok_or_else(|| CalcError::NotFound {
                kind: LookupKind::Character,
                name: name.to_string(),
            })
    }

    pub fn weapon(&self, name: &str) -> CalcResult<&WeaponRecord> {
        self.weapons
            .get(&normalize_lookup(name))
            .ok_or_else(|| CalcError::NotFound {
                kind: LookupKind::Weapon,
                name: name.to_string(),
            })
    }

    /// Character names in normalized-key order.
    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.characters.values().map(|record| record.name.as_str())
    }

    pub fn weapon_names(&self) -> impl Iterator<Item = &str> {
        self.weapons.values().map(|record| record.name.as_str())
    }
}

impl StatProvider for ReferenceData {
    fn character_base_stats(&self, name: &str) -> CalcResult<StatTable> {
        self.character(name).map(|record| record.stats.clone())
    }

    fn weapon_stats(&self, name: &str) -> CalcResult<StatTable> {
        self.weapon(name).map(|record| record.stats.clone())
    }
}

static BUNDLED: OnceLock<CalcResult<ReferenceData>> = OnceLock::new();

/// Process-wide bundled dataset, parsed on first use and never mutated.
pub fn bundled() -> CalcResult<&'static ReferenceData> {
    BUNDLED
        .get_or_init(|| {
            let data = ReferenceData::from_json(BUNDLED_CHARACTERS, BUNDLED_WEAPONS)?;
            debug!(
                characters = data.characters.len(),
                weapons = data.weapons.len(),
                "loaded bundled reference data"
            );
            Ok(data)
        })
        .as_ref()
        .map_err(Clone::clone)
}

pub fn lookup_character_base_stats(name: &str) -> CalcResult<StatTable> {
    bundled()?.character_base_stats(name)
}

pub fn lookup_weapon_stats(name: &str) -> CalcResult<StatTable> {
    bundled()?.weapon_stats(name)
}
