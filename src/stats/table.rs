use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::Stat;

/// Additive mapping from [Stat] to an accumulated value. Absent stats read as `0.0`.
///
/// Tables are plain values: merging copies entries in and never touches the source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable {
    inner: BTreeMap<Stat, f64>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table by adding each pair in order, so repeated stats accumulate.
    pub fn of(values: &[(Stat, f64)]) -> Self {
        values.iter().copied().collect()
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.inner.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, stat: Stat, value: f64) -> &mut Self {
        *self.inner.entry(stat).or_insert(0.0) += value;
        self
    }

    /// Adds every entry of `other` into self.
    pub fn add_table(&mut self, other: &StatTable) -> &mut Self {
        for (stat, value) in other.iter() {
            self.add(stat, value);
        }
        self
    }

    /// Value-style merge: a new table holding `self + other`.
    pub fn merged(&self, other: &StatTable) -> StatTable {
        let mut sum = self.clone();
        sum.add_table(other);
        sum
    }

    /// Stats with a non-zero accumulated value, in [Stat] declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        self.inner
            .iter()
            .filter(|(_, value)| **value != 0.0)
            .map(|(stat, value)| (*stat, *value))
    }

    pub fn to_vec(&self) -> Vec<(Stat, f64)> {
        self.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl PartialEq for StatTable {
    fn eq(&self, other: &Self) -> bool {
        self.inner
            .keys()
            .chain(other.inner.keys())
            .all(|stat| self.get(*stat) == other.get(*stat))
    }
}

impl FromIterator<(Stat, f64)> for StatTable {
    fn from_iter<I: IntoIterator<Item = (Stat, f64)>>(iter: I) -> Self {
        let mut table = StatTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<(Stat, f64)> for StatTable {
    fn extend<I: IntoIterator<Item = (Stat, f64)>>(&mut self, iter: I) {
        for (stat, value) in iter {
            self.add(stat, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_with_initial_values_accumulates() {
        let table = StatTable::of(&[(Stat::ATKPercent, 1.0), (Stat::ATKPercent, 5.0)]);
        assert_eq!(table.get(Stat::ATKPercent), 6.0);
    }

    #[test]
    fn adding_accumulates_from_zero() {
        let mut table = StatTable::new();
        assert_eq!(table.get(Stat::FlatATK), 0.0);
        table.add(Stat::FlatATK, 10.0);
        assert_eq!(table.get(Stat::FlatATK), 10.0);
        table.add(Stat::FlatATK, 10.0).add(Stat::FlatATK, 2.5);
        assert_eq!(table.get(Stat::FlatATK), 22.5);
    }

    #[test]
    fn add_table_leaves_source_untouched() {
        let mut target = StatTable::of(&[(Stat::FlatATK, 2000.0)]);
        let source = StatTable::of(&[(Stat::CritDMG, 0.5)]);
        target.add_table(&source);

        assert_eq!(target.get(Stat::CritDMG), 0.5);
        assert_eq!(target.get(Stat::FlatATK), 2000.0);
        assert_eq!(source, StatTable::of(&[(Stat::CritDMG, 0.5)]));
    }

    #[test]
    fn merging_empty_table_is_identity() {
        let table = StatTable::of(&[(Stat::BaseATK, 334.85), (Stat::CritRate, 0.242)]);
        assert_eq!(table.merged(&StatTable::new()), table);
        assert_eq!(StatTable::new().merged(&table), table);
    }

    #[test]
    fn merge_is_associative() {
        let a = StatTable::of(&[(Stat::FlatATK, 1.0), (Stat::CritRate, 0.25)]);
        let b = StatTable::of(&[(Stat::FlatATK, 2.0), (Stat::CritDMG, 0.5)]);
        let c = StatTable::of(&[(Stat::ElementalMastery, 80.0), (Stat::CritRate, 0.5)]);

        let left = a.merged(&b).merged(&c);
        let right = a.merged(&b.merged(&c));
        for stat in Stat::all() {
            assert_eq!(left.get(stat), right.get(stat), "{stat} differs");
        }
    }

    #[test]
    fn iteration_skips_zeroed_entries() {
        let mut table = StatTable::of(&[(Stat::FlatHP, 100.0), (Stat::CritRate, 0.1)]);
        table.add(Stat::FlatHP, -100.0);
        assert_eq!(table.to_vec(), vec![(Stat::CritRate, 0.1)]);
        assert_eq!(table, StatTable::of(&[(Stat::CritRate, 0.1)]));
    }

    #[test]
    fn serializes_as_stat_name_map() {
        let table = StatTable::of(&[(Stat::BaseATK, 510.0), (Stat::ElementalMastery, 165.0)]);
        let json = serde_json::to_string(&table).expect("table should serialize");
        assert_eq!(json, r#"{"BaseATK":510.0,"ElementalMastery":165.0}"#);
        let back: StatTable = serde_json::from_str(&json).expect("table should deserialize");
        assert_eq!(back, table);
    }
}
