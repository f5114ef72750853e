//! Particle and orb energy income, and the Energy Recharge needed to afford a burst.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

pub const SAME_ELEMENT_ENERGY: f64 = 3.0;
pub const ELEMENTLESS_ENERGY: f64 = 2.0;
pub const DIFFERENT_ELEMENT_ENERGY: f64 = 1.0;
/// An orb is worth this many particles of the same element relation.
pub const ORB_MULTIPLIER: f64 = 6.0;

/// Share of energy an off-field character receives, by party size.
pub fn off_field_multiplier(party_size: u8) -> CalcResult<f64> {
    match party_size {
        4 => Ok(0.6),
        3 => Ok(0.7),
        2 => Ok(0.8),
        1 => Ok(0.0),
        size => Err(CalcError::InvalidPartySize { size }),
    }
}

/// Drop counts split by how their element relates to the receiving character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementCounts {
    pub same: f64,
    pub different: f64,
    pub elementless: f64,
}

impl ElementCounts {
    /// Raw energy of these drops counted as particles, before any multiplier.
    fn particle_energy(&self) -> f64 {
        self.same * SAME_ELEMENT_ENERGY
            + self.different * DIFFERENT_ELEMENT_ENERGY
            + self.elementless * ELEMENTLESS_ENERGY
    }
}

/// Energy drops one character collects over a rotation.
///
/// `caught` drops land while the character is on field; `off_field` drops are picked up by
/// someone else and shared at the party-size multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergySources {
    pub particles_caught: ElementCounts,
    pub particles_off_field: ElementCounts,
    pub orbs_caught: ElementCounts,
    pub orbs_off_field: ElementCounts,
}

impl EnergySources {
    /// Energy stored by a character with `energy_recharge` (1.0 = 100 %).
    pub fn energy_generated(&self, party_size: u8, energy_recharge: f64) -> CalcResult<f64> {
        let off_field = off_field_multiplier(party_size)?;

        let particles = self.particles_caught.particle_energy()
            + self.particles_off_field.particle_energy() * off_field;
        let orbs = (self.orbs_caught.particle_energy()
            + self.orbs_off_field.particle_energy() * off_field)
            * ORB_MULTIPLIER;

        Ok((particles + orbs) * energy_recharge)
    }

    /// Energy Recharge needed to collect `burst_cost` energy per rotation.
    ///
    /// Infinite when the sources yield no energy at all.
    pub fn energy_recharge_requirement(&self, party_size: u8, burst_cost: f64) -> CalcResult<f64> {
        let energy = self.energy_generated(party_size, 1.0)?;
        if energy == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(burst_cost / energy)
    }
}
