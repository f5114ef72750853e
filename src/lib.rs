//! Stat aggregation, damage evaluation and artifact optimization for a stat-driven combat model.

pub mod artifact;
pub mod cli;
pub mod combat;
pub mod config;
pub mod data;
pub mod energy;
pub mod error;
pub mod optimizer;
pub mod rotation;
pub mod stats;

pub use error::{CalcError, CalcResult, ErrorKind};
pub use rotation::{Operation, Rotation};
pub use stats::{Amplifier, BaseScaling, DamageType, Element, Stat, StatTable};
