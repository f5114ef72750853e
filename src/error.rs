//! Error taxonomy for stat lookups, artifact validation and roll budgets.

use std::fmt;

use thiserror::Error;

use crate::artifact::Slot;
use crate::stats::{Amplifier, Element, Stat};

/// Broad classification of a [CalcError]. None of these are retried by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid rarity/level/stat combination. Always a caller programming error.
    Domain,
    /// Unknown character or weapon name.
    NotFound,
    /// A roll or unroll that the builder's counters cannot absorb.
    Budget,
    /// Bundled reference data failed to parse.
    Data,
}

/// Which reference dataset a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Character,
    Weapon,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Weapon => write!(f, "weapon"),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CalcError {
    #[error("invalid rarity {rarity}: artifacts range from 1 to 5 stars")]
    InvalidRarity { rarity: u8 },

    #[error("level {level} is out of range for a {rarity}-star artifact (max {max})")]
    InvalidLevel { rarity: u8, level: u8, max: u8 },

    #[error("{stat} is not a valid main stat{}", slot_suffix(.slot))]
    InvalidMainStat { stat: Stat, slot: Option<Slot> },

    #[error("{stat} is not a valid substat")]
    InvalidSubStat { stat: Stat },

    #[error("{amplifier} amplifier cannot apply to {element} damage")]
    InvalidAmplifier {
        amplifier: Amplifier,
        element: Element,
    },

    #[error("party size {size} is invalid: parties hold 1 to 4 characters")]
    InvalidPartySize { size: u8 },

    #[error("no {kind} named '{name}'")]
    NotFound { kind: LookupKind, name: String },

    #[error("cannot roll {stat} {requested} time(s): only {available} roll(s) available")]
    BudgetExceeded {
        stat: Stat,
        requested: u32,
        available: u32,
    },

    #[error("cannot unroll {stat} {requested} time(s): only {applied} matching roll(s) applied")]
    RollUnderflow {
        stat: Stat,
        requested: u32,
        applied: u32,
    },

    #[error("reference data is malformed: {0}")]
    MalformedData(String),
}

fn slot_suffix(slot: &Option<Slot>) -> String {
    slot.map(|slot| format!(" for the {slot}")).unwrap_or_default()
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRarity { .. }
            | Self::InvalidLevel { .. }
            | Self::InvalidMainStat { .. }
            | Self::InvalidSubStat { .. }
            | Self::InvalidAmplifier { .. }
            | Self::InvalidPartySize { .. } => ErrorKind::Domain,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BudgetExceeded { .. } | Self::RollUnderflow { .. } => ErrorKind::Budget,
            Self::MalformedData(_) => ErrorKind::Data,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
