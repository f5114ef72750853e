//! Fixed main-stat growth curves and substat roll values.
//!
//! Percentage curves are stored as displayed in game (46.6 means 46.6 %) and converted to
//! fractions on lookup; flat HP, flat ATK and elemental mastery are stored as-is.

use crate::error::{CalcError, CalcResult};
use crate::stats::Stat;

/// Substats in [Stat] declaration order, which is also the optimizer tie-break order.
pub const SUB_STATS: [Stat; 10] = [
    Stat::FlatHP,
    Stat::HPPercent,
    Stat::FlatATK,
    Stat::ATKPercent,
    Stat::FlatDEF,
    Stat::DEFPercent,
    Stat::ElementalMastery,
    Stat::CritRate,
    Stat::CritDMG,
    Stat::EnergyRecharge,
];

pub fn is_valid_substat(stat: Stat) -> bool {
    SUB_STATS.contains(&stat)
}

struct MainStatCurves {
    hp: &'static [f64],
    atk: &'static [f64],
    /// HP%, ATK% and elemental damage bonus.
    percent: &'static [f64],
    /// DEF% and physical damage bonus.
    def_physical: &'static [f64],
    em: &'static [f64],
    er: &'static [f64],
    crit_rate: &'static [f64],
    crit_dmg: &'static [f64],
    healing: &'static [f64],
}

const ONE_STAR: MainStatCurves = MainStatCurves {
    hp: &[129.0, 178.0, 227.0, 275.0, 324.0],
    atk: &[8.0, 12.0, 15.0, 18.0, 21.0],
    percent: &[3.1, 4.3, 5.5, 6.7, 7.9],
    def_physical: &[3.9, 5.4, 6.9, 8.4, 9.9],
    em: &[12.6, 17.6, 22.5, 27.4, 32.3],
    er: &[3.5, 4.8, 6.1, 7.5, 8.8],
    crit_rate: &[2.1, 2.9, 3.7, 4.5, 5.3],
    crit_dmg: &[4.2, 5.8, 7.4, 9.0, 10.5],
    healing: &[2.4, 3.3, 4.3, 5.2, 6.1],
};

const TWO_STAR: MainStatCurves = MainStatCurves {
    hp: &[258.0, 331.0, 404.0, 478.0, 551.0],
    atk: &[17.0, 22.0, 26.0, 31.0, 36.0],
    percent: &[4.2, 5.4, 6.6, 7.8, 9.0],
    def_physical: &[5.2, 6.7, 8.2, 9.7, 11.2],
    em: &[16.8, 21.5, 26.3, 31.0, 35.8],
    er: &[4.7, 6.0, 7.3, 8.6, 9.9],
    crit_rate: &[2.8, 3.6, 4.4, 5.2, 6.0],
    crit_dmg: &[5.6, 7.2, 8.8, 10.4, 11.9],
    healing: &[3.2, 4.1, 5.0, 6.0, 6.9],
};

const THREE_STAR: MainStatCurves = MainStatCurves {
    hp: &[
        430.0, 552.0, 674.0, 796.0, 918.0, 1040.0, 1162.0, 1283.0, 1405.0, 1527.0, 1649.0, 1771.0,
        1893.0,
    ],
    atk: &[
        28.0, 36.0, 44.0, 52.0, 60.0, 68.0, 76.0, 84.0, 91.0, 99.0, 107.0, 115.0, 123.0,
    ],
    percent: &[
        5.2, 6.7, 8.2, 9.7, 11.2, 12.7, 14.2, 15.6, 17.1, 18.6, 20.1, 21.6, 23.1,
    ],
    def_physical: &[
        6.6, 8.4, 10.3, 12.1, 14.0, 15.8, 17.7, 19.6, 21.4, 23.3, 25.1, 27.0, 28.8,
    ],
    em: &[
        21.0, 26.9, 32.9, 38.8, 44.8, 50.7, 56.7, 62.6, 68.5, 74.5, 80.4, 86.4, 92.3,
    ],
    er: &[
        5.8, 7.5, 9.1, 10.8, 12.4, 14.1, 15.7, 17.4, 19.0, 20.7, 22.3, 24.0, 25.6,
    ],
    crit_rate: &[
        3.5, 4.5, 5.5, 6.5, 7.5, 8.4, 9.4, 10.4, 11.4, 12.4, 13.4, 14.4, 15.4,
    ],
    crit_dmg: &[
        7.0, 9.0, 11.0, 12.9, 14.9, 16.9, 18.9, 20.9, 22.8, 24.8, 26.8, 28.8, 30.8,
    ],
    healing: &[
        4.0, 5.2, 6.3, 7.5, 8.6, 9.8, 10.9, 12.1, 13.2, 14.4, 15.5, 16.7, 17.8,
    ],
};

const FOUR_STAR: MainStatCurves = MainStatCurves {
    hp: &[
        645.0, 828.0, 1011.0, 1194.0, 1377.0, 1559.0, 1742.0, 1925.0, 2108.0, 2291.0, 2474.0,
        2657.0, 2839.0, 3022.0, 3205.0, 3388.0, 3571.0,
    ],
    atk: &[
        42.0, 54.0, 66.0, 78.0, 90.0, 102.0, 113.0, 125.0, 137.0, 149.0, 161.0, 173.0, 185.0,
        197.0, 209.0, 221.0, 232.0,
    ],
    percent: &[
        6.3, 8.1, 9.9, 11.6, 13.4, 15.2, 17.0, 18.8, 20.6, 22.3, 24.1, 25.9, 27.7, 29.5, 31.3,
        33.0, 34.8,
    ],
    def_physical: &[
        7.9, 10.1, 12.3, 14.6, 16.8, 19.0, 21.2, 23.5, 25.7, 27.9, 30.2, 32.4, 34.6, 36.8, 39.1,
        41.3, 43.5,
    ],
    em: &[
        25.2, 32.3, 39.4, 46.6, 53.7, 60.8, 68.0, 75.1, 82.2, 89.4, 96.5, 103.6, 110.8, 117.9,
        125.0, 132.2, 139.3,
    ],
    er: &[
        7.0, 9.0, 11.0, 12.9, 14.9, 16.9, 18.9, 20.9, 22.8, 24.8, 26.8, 28.8, 30.8, 32.8, 34.7,
        36.7, 38.7,
    ],
    crit_rate: &[
        4.2, 5.4, 6.6, 7.8, 9.0, 10.1, 11.3, 12.5, 13.7, 14.9, 16.1, 17.3, 18.5, 19.7, 20.8, 22.0,
        23.2,
    ],
    crit_dmg: &[
        8.4, 10.8, 13.1, 15.5, 17.9, 20.3, 22.7, 25.0, 27.4, 29.8, 32.2, 34.5, 36.9, 39.3, 41.7,
        44.1, 46.4,
    ],
    healing: &[
        4.8, 6.2, 7.6, 9.0, 10.3, 11.7, 13.1, 14.5, 15.9, 17.2, 18.6, 20.0, 21.4, 22.8, 24.2, 25.5,
        26.9,
    ],
};

const FIVE_STAR: MainStatCurves = MainStatCurves {
    hp: &[
        717.0, 920.0, 1123.0, 1326.0, 1530.0, 1733.0, 1936.0, 2139.0, 2342.0, 2545.0, 2749.0,
        2952.0, 3155.0, 3358.0, 3561.0, 3764.0, 3967.0, 4171.0, 4374.0, 4577.0, 4780.0,
    ],
    atk: &[
        47.0, 60.0, 73.0, 86.0, 100.0, 113.0, 126.0, 139.0, 152.0, 166.0, 179.0, 192.0, 205.0,
        219.0, 232.0, 245.0, 258.0, 272.0, 285.0, 298.0, 311.0,
    ],
    percent: &[
        7.0, 9.0, 11.0, 12.9, 14.9, 16.9, 18.9, 20.9, 22.8, 24.8, 26.8, 28.8, 30.8, 32.8, 34.7,
        36.7, 38.7, 40.7, 42.7, 44.6, 46.6,
    ],
    def_physical: &[
        8.7, 11.2, 13.7, 16.2, 18.6, 21.1, 23.6, 26.1, 28.6, 31.0, 33.5, 36.0, 38.5, 40.9, 43.4,
        45.9, 48.4, 50.8, 53.3, 55.8, 58.3,
    ],
    em: &[
        28.0, 35.9, 43.8, 51.8, 59.7, 67.6, 75.5, 83.5, 91.4, 99.3, 107.2, 115.2, 123.1, 131.0,
        138.9, 146.9, 154.8, 162.7, 170.6, 178.6, 186.5,
    ],
    er: &[
        7.8, 10.0, 12.2, 14.4, 16.6, 18.8, 21.0, 23.2, 25.4, 27.6, 29.8, 32.0, 34.2, 36.4, 38.6,
        40.8, 43.0, 45.2, 47.4, 49.6, 51.8,
    ],
    crit_rate: &[
        4.7, 6.0, 7.4, 8.7, 10.0, 11.4, 12.7, 14.0, 15.4, 16.7, 18.0, 19.4, 20.7, 22.0, 23.3, 24.7,
        26.0, 27.3, 28.7, 30.0, 31.1,
    ],
    crit_dmg: &[
        9.3, 12.0, 14.7, 17.4, 20.0, 22.7, 25.4, 28.0, 30.7, 33.4, 36.0, 38.7, 41.4, 44.0, 46.7,
        49.4, 52.0, 54.7, 57.4, 60.0, 62.2,
    ],
    healing: &[
        5.4, 6.9, 8.4, 10.0, 11.5, 13.0, 14.5, 16.1, 17.6, 19.1, 20.6, 22.2, 23.7, 25.2, 26.7,
        28.3, 29.8, 31.3, 32.8, 34.4, 35.9,
    ],
};

/// Single max-quality roll per rarity, columns in [SUB_STATS] order.
const SUB_STAT_ROLLS: [[f64; 10]; 5] = [
    [29.88, 0.0146, 1.95, 0.0146, 2.31, 0.0182, 5.83, 0.0097, 0.0194, 0.0162],
    [71.7, 0.0233, 4.67, 0.0233, 5.56, 0.0291, 9.33, 0.0155, 0.0311, 0.0259],
    [143.4, 0.035, 9.34, 0.035, 11.11, 0.0437, 13.99, 0.0233, 0.0466, 0.0389],
    [239.0, 0.0466, 15.56, 0.0466, 18.52, 0.0583, 18.65, 0.0311, 0.0622, 0.0518],
    [298.75, 0.0583, 19.45, 0.0583, 23.15, 0.0729, 23.31, 0.0389, 0.0777, 0.0648],
];

pub fn validate_rarity(rarity: u8) -> CalcResult<()> {
    if (1..=5).contains(&rarity) {
        Ok(())
    } else {
        Err(CalcError::InvalidRarity { rarity })
    }
}

pub fn max_level(rarity: u8) -> CalcResult<u8> {
    match rarity {
        1 | 2 => Ok(4),
        3 => Ok(12),
        4 => Ok(16),
        5 => Ok(20),
        _ => Err(CalcError::InvalidRarity { rarity }),
    }
}

pub fn validate_level(rarity: u8, level: u8) -> CalcResult<()> {
    let max = max_level(rarity)?;
    if level > max {
        return Err(CalcError::InvalidLevel { rarity, level, max });
    }
    Ok(())
}

fn curves(rarity: u8) -> CalcResult<&'static MainStatCurves> {
    match rarity {
        1 => Ok(&ONE_STAR),
        2 => Ok(&TWO_STAR),
        3 => Ok(&THREE_STAR),
        4 => Ok(&FOUR_STAR),
        5 => Ok(&FIVE_STAR),
        _ => Err(CalcError::InvalidRarity { rarity }),
    }
}

/// Main-stat value of a piece; percentages are returned as fractions.
pub fn main_stat_value(rarity: u8, level: u8, stat: Stat) -> CalcResult<f64> {
    validate_level(rarity, level)?;
    let curves = curves(rarity)?;

    let (curve, scale) = match stat {
        Stat::FlatHP => (curves.hp, 1.0),
        Stat::FlatATK => (curves.atk, 1.0),
        Stat::ElementalMastery => (curves.em, 1.0),
        Stat::HPPercent | Stat::ATKPercent => (curves.percent, 0.01),
        stat if stat.is_elemental_dmg_bonus() => (curves.percent, 0.01),
        Stat::DEFPercent | Stat::PhysicalDMGBonus => (curves.def_physical, 0.01),
        Stat::EnergyRecharge => (curves.er, 0.01),
        Stat::CritRate => (curves.crit_rate, 0.01),
        Stat::CritDMG => (curves.crit_dmg, 0.01),
        Stat::HealingBonus => (curves.healing, 0.01),
        stat => return Err(CalcError::InvalidMainStat { stat, slot: None }),
    };

    curve
        .get(usize::from(level))
        .map(|value| value * scale)
        .ok_or(CalcError::InvalidLevel {
            rarity,
            level,
            max: (curve.len() - 1) as u8,
        })
}

/// Value of one max-quality roll of `stat` at `rarity`.
pub fn sub_stat_value(rarity: u8, stat: Stat) -> CalcResult<f64> {
    validate_rarity(rarity)?;
    let column = SUB_STATS
        .iter()
        .position(|candidate| *candidate == stat)
        .ok_or(CalcError::InvalidSubStat { stat })?;
    Ok(SUB_STAT_ROLLS[usize::from(rarity - 1)][column])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn curves_cover_every_level() {
        for rarity in 1..=5u8 {
            let max = max_level(rarity).expect("valid rarity");
            for level in 0..=max {
                for stat in [Stat::FlatHP, Stat::CritDMG, Stat::PhysicalDMGBonus] {
                    assert!(main_stat_value(rarity, level, stat).is_ok());
                }
            }
            assert!(main_stat_value(rarity, max + 1, Stat::FlatHP).is_err());
        }
    }

    #[test]
    fn five_star_max_level_values() {
        approx_eq(main_stat_value(5, 20, Stat::FlatHP).unwrap(), 4780.0);
        approx_eq(main_stat_value(5, 20, Stat::FlatATK).unwrap(), 311.0);
        approx_eq(main_stat_value(5, 20, Stat::ATKPercent).unwrap(), 0.466);
        approx_eq(main_stat_value(5, 20, Stat::PyroDMGBonus).unwrap(), 0.466);
        approx_eq(main_stat_value(5, 20, Stat::PhysicalDMGBonus).unwrap(), 0.583);
        approx_eq(main_stat_value(5, 20, Stat::ElementalMastery).unwrap(), 186.5);
        approx_eq(main_stat_value(5, 20, Stat::EnergyRecharge).unwrap(), 0.518);
        approx_eq(main_stat_value(5, 20, Stat::CritRate).unwrap(), 0.311);
        approx_eq(main_stat_value(5, 20, Stat::CritDMG).unwrap(), 0.622);
        approx_eq(main_stat_value(4, 16, Stat::HealingBonus).unwrap(), 0.269);
        approx_eq(main_stat_value(1, 0, Stat::FlatATK).unwrap(), 8.0);
    }

    #[test]
    fn invalid_inputs_are_domain_errors() {
        let err = main_stat_value(6, 0, Stat::FlatHP).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRarity { rarity: 6 }));
        let err = main_stat_value(4, 17, Stat::FlatHP).unwrap_err();
        assert!(matches!(err, CalcError::InvalidLevel { max: 16, .. }));
        let err = main_stat_value(5, 20, Stat::FlatDEF).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(main_stat_value(0, 0, Stat::FlatHP).is_err());
    }

    #[test]
    fn substat_rolls() {
        approx_eq(sub_stat_value(5, Stat::CritRate).unwrap(), 0.0389);
        approx_eq(sub_stat_value(5, Stat::CritDMG).unwrap(), 0.0777);
        approx_eq(sub_stat_value(4, Stat::FlatHP).unwrap(), 239.0);
        approx_eq(sub_stat_value(1, Stat::EnergyRecharge).unwrap(), 0.0162);
        assert!(matches!(
            sub_stat_value(5, Stat::PyroDMGBonus),
            Err(CalcError::InvalidSubStat { .. })
        ));
        assert!(matches!(
            sub_stat_value(0, Stat::CritRate),
            Err(CalcError::InvalidRarity { .. })
        ));
    }
}
