pub mod loader;

pub use loader::{
    bundled, lookup_character_base_stats, lookup_weapon_stats, normalize_lookup,
    CharacterRecord, ReferenceData, WeaponRecord, UNIVERSAL_BASE_STATS,
};

use crate::error::CalcResult;
use crate::stats::StatTable;

/// Source of character and weapon stat tables. Misses fail with `NotFound`.
pub trait StatProvider {
    fn character_base_stats(&self, name: &str) -> CalcResult<StatTable>;
    fn weapon_stats(&self, name: &str) -> CalcResult<StatTable>;
}
