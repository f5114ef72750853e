use crate::optimizer::main_stats::{evaluate_main_stat_candidates_parallel, MainStatResult};
use crate::rotation::Rotation;
use crate::stats::StatTable;

/// Sorts results by damage, highest first. Equal damage keeps enumeration order.
pub fn rank_results(mut results: Vec<MainStatResult>) -> Vec<MainStatResult> {
    results.sort_by(|left, right| right.damage.total_cmp(&left.damage));
    results
}

/// Every main-stat combination for `base`, best first.
pub fn rank_main_stat_combinations(base: &StatTable, rotation: &Rotation) -> Vec<MainStatResult> {
    rank_results(evaluate_main_stat_candidates_parallel(base, rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::main_stats::{global_main_stat_optimizer, MainStatSelection};
    use crate::rotation::Operation;
    use crate::stats::Stat;

    fn er_and_cd(stats: &StatTable) -> f64 {
        stats.get(Stat::EnergyRecharge) + stats.get(Stat::CritDMG)
    }

    fn result(damage: f64, circlet: Stat) -> MainStatResult {
        MainStatResult {
            selection: MainStatSelection {
                sands: Stat::ATKPercent,
                goblet: Stat::ATKPercent,
                circlet,
            },
            damage,
        }
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let ranked = rank_results(vec![
            result(1.0, Stat::HPPercent),
            result(3.0, Stat::CritRate),
            result(1.0, Stat::CritDMG),
        ]);
        let order: Vec<Stat> = ranked.iter().map(|r| r.selection.circlet).collect();
        assert_eq!(order, [Stat::CritRate, Stat::HPPercent, Stat::CritDMG]);
    }

    #[test]
    fn top_ranked_matches_the_optimizer() {
        let rotation = Rotation::of([("er+cd", Operation::Function(er_and_cd))]);
        let base = StatTable::of(&[(Stat::EnergyRecharge, 1.0)]);
        let ranked = rank_main_stat_combinations(&base, &rotation);
        assert_eq!(ranked.len(), 420);
        assert_eq!(
            ranked[0].selection,
            global_main_stat_optimizer(&base, &rotation)
        );
        assert_eq!(ranked[0].selection.sands, Stat::EnergyRecharge);
        assert_eq!(ranked[0].selection.circlet, Stat::CritDMG);
    }
}
