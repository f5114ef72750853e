pub mod damage;
pub mod formulas;

pub use damage::{
    calculate_damage, calculate_damage_against, DamageInstance, Enemy, CHARACTER_LEVEL,
};
pub use formulas::{
    amplifier_multiplier, avg_crit_multiplier, compose, def_multiplier, res_multiplier, total_atk,
    total_def, total_hp, total_stat, DamageFactors,
};
