//! Ordered action sequences and their evaluation against a stat table.

use std::io;

use serde::Serialize;

use crate::combat::DamageInstance;
use crate::stats::StatTable;

/// A single entry of a [Rotation].
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fixed-formula hit.
    Damage(DamageInstance),
    /// Arbitrary pure function of the final stats, for mechanics the formula cannot express.
    Function(fn(&StatTable) -> f64),
}

impl Operation {
    pub fn evaluate(&self, stats: &StatTable) -> f64 {
        match self {
            Self::Damage(instance) => instance.damage(stats),
            Self::Function(function) => function(stats),
        }
    }
}

impl From<DamageInstance> for Operation {
    fn from(instance: DamageInstance) -> Self {
        Self::Damage(instance)
    }
}

/// Damage of one named action within a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDamage {
    pub name: String,
    pub damage: f64,
    /// Fraction of the rotation total; 0 when the total is 0.
    pub share: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Rotation {
    operations: Vec<(String, Operation)>,
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of<N, O>(operations: impl IntoIterator<Item = (N, O)>) -> Self
    where
        N: Into<String>,
        O: Into<Operation>,
    {
        let mut rotation = Self::new();
        for (name, operation) in operations {
            rotation.add(name, operation);
        }
        rotation
    }

    /// Appends an action; names need not be unique.
    pub fn add(&mut self, name: impl Into<String>, operation: impl Into<Operation>) -> &mut Self {
        self.operations.push((name.into(), operation.into()));
        self
    }

    pub fn evaluate(&self, stats: &StatTable) -> f64 {
        self.operations
            .iter()
            .map(|(_, operation)| operation.evaluate(stats))
            .sum()
    }

    /// Per-action damage in declaration order.
    pub fn breakdown(&self, stats: &StatTable) -> Vec<ActionDamage> {
        let damages: Vec<(String, f64)> = self
            .operations
            .iter()
            .map(|(name, operation)| (name.clone(), operation.evaluate(stats)))
            .collect();
        let total: f64 = damages.iter().map(|(_, damage)| damage).sum();

        damages
            .into_iter()
            .map(|(name, damage)| ActionDamage {
                name,
                damage,
                share: if total == 0.0 { 0.0 } else { damage / total },
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.operations
            .iter()
            .map(|(name, operation)| (name.as_str(), operation))
    }
}

/// Writes a breakdown as `name,damage,share` rows with a header line.
pub fn write_breakdown_csv<W: io::Write>(
    breakdown: &[ActionDamage],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in breakdown {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
