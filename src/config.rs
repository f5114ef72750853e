//! Scenario files: who is attacking, with what gear and buffs, doing which rotation.
//!
//! `.yaml`/`.yml` files are parsed with serde_yaml, `.json` with serde_json.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::artifact::ArtifactSet;
use crate::combat::DamageInstance;
use crate::data::StatProvider;
use crate::energy::EnergySources;
use crate::error::CalcError;
use crate::rotation::Rotation;
use crate::stats::{Stat, StatTable};

pub const DEFAULT_SCENARIO_PATH: &str = "scenarios/diluc.yaml";
pub const SCENARIO_PATH_ENV: &str = "ARTIFACTOR_SCENARIO";

/// Scenario path from `ARTIFACTOR_SCENARIO`, falling back to [DEFAULT_SCENARIO_PATH].
pub fn default_scenario_path() -> String {
    env::var(SCENARIO_PATH_ENV).unwrap_or_else(|_| DEFAULT_SCENARIO_PATH.to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported scenario format '{path}': expected .yaml, .yml or .json")]
    UnsupportedFormat { path: String },

    #[error(transparent)]
    Calc(#[from] CalcError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_rarity() -> u8 {
    5
}

fn default_level() -> u8 {
    20
}

/// Equipped artifacts: uniform rarity and level, three variable main stats and raw substat totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    #[serde(default = "default_rarity")]
    pub rarity: u8,
    #[serde(default = "default_level")]
    pub level: u8,
    pub sands: Stat,
    pub goblet: Stat,
    pub circlet: Stat,
    #[serde(default)]
    pub substats: StatTable,
}

impl ArtifactSpec {
    pub fn set(&self) -> Result<ArtifactSet, CalcError> {
        ArtifactSet::uniform(self.rarity, self.level, self.sands, self.goblet, self.circlet)
    }

    /// Main stats of the five pieces plus the listed substats.
    pub fn stats(&self) -> Result<StatTable, CalcError> {
        let set = self.set()?;
        let mut stats: StatTable = set
            .pieces()
            .iter()
            .map(|piece| (piece.main_stat(), piece.main_stat_value()))
            .collect();
        stats.add_table(&self.substats);
        Ok(stats)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub name: String,
    #[serde(flatten)]
    pub instance: DamageInstance,
}

/// Derives the ER floor from a team's energy income instead of stating it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySpec {
    pub party_size: u8,
    pub burst_cost: f64,
    #[serde(default)]
    pub sources: EnergySources,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    /// Added to the looked-up character and weapon stats.
    #[serde(default)]
    pub base_stats: StatTable,
    #[serde(default)]
    pub buffs: StatTable,
    #[serde(default)]
    pub artifacts: Option<ArtifactSpec>,
    #[serde(default)]
    pub rotation: Vec<ActionSpec>,
    #[serde(default)]
    pub energy_recharge_requirement: Option<f64>,
    #[serde(default)]
    pub energy: Option<EnergySpec>,
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let scenario = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw)?,
            Some("json") => Self::from_json_str(&raw)?,
            _ => return Err(ConfigError::UnsupportedFormat { path: shown }),
        };
        debug!(path = %shown, actions = scenario.rotation.len(), "loaded scenario");
        Ok(scenario)
    }

    pub fn from_yaml_str(raw: &str) -> ConfigResult<Self> {
        let scenario: Self = serde_yaml::from_str(raw)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let scenario: Self = serde_json::from_str(raw)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks every rotation action; parsing alone accepts any amplifier on any element.
    pub fn validate(&self) -> ConfigResult<()> {
        for action in &self.rotation {
            action.instance.validate()?;
        }
        Ok(())
    }

    /// Character, weapon, explicit base stats and buffs; no artifacts.
    pub fn base_stats(&self, provider: &dyn StatProvider) -> ConfigResult<StatTable> {
        let mut stats = StatTable::new();
        if let Some(character) = &self.character {
            stats.add_table(&provider.character_base_stats(character)?);
        }
        if let Some(weapon) = &self.weapon {
            stats.add_table(&provider.weapon_stats(weapon)?);
        }
        stats.add_table(&self.base_stats).add_table(&self.buffs);
        Ok(stats)
    }

    pub fn artifact_stats(&self) -> ConfigResult<StatTable> {
        match &self.artifacts {
            Some(spec) => Ok(spec.stats()?),
            None => Ok(StatTable::new()),
        }
    }

    /// Base stats plus equipped artifacts.
    pub fn final_stats(&self, provider: &dyn StatProvider) -> ConfigResult<StatTable> {
        Ok(self.base_stats(provider)?.merged(&self.artifact_stats()?))
    }

    pub fn rotation(&self) -> Rotation {
        let mut rotation = Rotation::new();
        for action in &self.rotation {
            rotation.add(action.name.clone(), action.instance);
        }
        rotation
    }

    /// Explicit requirement first, then one derived from `energy`, else no floor.
    pub fn energy_recharge_requirement(&self) -> ConfigResult<f64> {
        if let Some(requirement) = self.energy_recharge_requirement {
            return Ok(requirement);
        }
        match &self.energy {
            Some(energy) => Ok(energy
                .sources
                .energy_recharge_requirement(energy.party_size, energy.burst_cost)?),
            None => Ok(0.0),
        }
    }
}
