//! Artifact pieces, their main-stat tables and the substat roll ledger.

pub mod builder;
pub mod piece;
pub mod tables;

pub use builder::{ArtifactBuilder, BuilderProfile, RollQuality};
pub use piece::{ArtifactPiece, ArtifactSet, Slot};
pub use tables::{main_stat_value, max_level, sub_stat_value, SUB_STATS};
