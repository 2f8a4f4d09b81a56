//! Properties of the tray, grouping and summaries over generated rolls.

use std::collections::HashSet;

use proptest::prelude::*;

use rk_dice::{Die, DiceTray, FixedSource, Grouping, RollEngine, RollResult, SequentialIds};

fn die_strategy() -> impl Strategy<Value = Die> {
    prop_oneof![
        Just(Die::D4),
        Just(Die::D6),
        Just(Die::D8),
        Just(Die::D10),
        Just(Die::D12),
        Just(Die::D20),
        Just(Die::D100),
        (1u32..=40).prop_map(|n| Die::from_faces(n).unwrap_or(Die::D6)),
    ]
}

fn result_strategy() -> impl Strategy<Value = RollResult> {
    let label = prop_oneof![Just(""), Just("Attack"), Just("Damage"), Just("Save")];
    (die_strategy(), label, 1u32..=100, -5i64..=5, 0i64..6).prop_map(
        |(die, label, outcome, bonus, timestamp)| RollResult {
            die,
            label: label.to_string(),
            outcome: outcome.min(die.faces()),
            bonus,
            timestamp,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn add_dice_then_drain_places_bonus_once(
        count in 1u32..=10,
        die in die_strategy(),
        bonus in -20i64..=20,
        label in "[a-zA-Z ]{0,12}",
    ) {
        let mut ids = SequentialIds::new(11);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, count, die, bonus, &label).expect("add failed");

        let entries = tray.drain();
        prop_assert_eq!(entries.len(), count as usize);
        prop_assert!(tray.is_empty());
        prop_assert!(entries.iter().all(|e| e.die == die && e.label == label));
        let (last, rest) = entries.split_last().expect("no entries");
        prop_assert!(rest.iter().all(|e| e.bonus == 0));
        prop_assert_eq!(last.bonus, bonus);
        let unique: HashSet<_> = entries.iter().map(|e| e.id).collect();
        prop_assert_eq!(unique.len(), entries.len());
    }

    #[test]
    fn grouping_is_a_partition(results in prop::collection::vec(result_strategy(), 0..40)) {
        let grouping = Grouping::from_results(&results);
        let mut covered = 0;
        for key in grouping.display_order() {
            let members = grouping.members(key).unwrap_or_default();
            prop_assert!(!members.is_empty());
            for member in members {
                prop_assert_eq!(&member.label, &key.label);
                prop_assert_eq!(member.timestamp, key.timestamp);
                prop_assert_eq!(member.die.faces(), key.die.faces());
            }
            covered += members.len();
        }
        prop_assert_eq!(covered, results.len());

        let mut regrouped: Vec<RollResult> = grouping
            .into_display_groups()
            .iter()
            .flat_map(|g| g.results().iter().map(|r| (*r).clone()))
            .collect();
        let mut original = results.clone();
        let key = |r: &RollResult| (r.timestamp, r.label.clone(), r.die.faces(), r.outcome, r.bonus);
        regrouped.sort_by_key(key);
        original.sort_by_key(key);
        prop_assert_eq!(regrouped, original);
    }

    #[test]
    fn display_order_is_stable_and_newest_first(results in prop::collection::vec(result_strategy(), 0..40)) {
        let first: Vec<_> = Grouping::from_results(&results)
            .display_order()
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<_> = Grouping::from_results(&results)
            .display_order()
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn summary_total_is_dice_plus_bonus(
        draws in prop::collection::vec(1u32..=20, 1..10),
        bonus in -10i64..=10,
    ) {
        let mut ids = SequentialIds::new(5);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, draws.len() as u32, Die::D20, bonus, "Check")
            .expect("add failed");

        let mut engine = RollEngine::new(FixedSource::new(draws.clone()));
        let results = engine.roll(&tray.drain(), 1_000);
        let groups = Grouping::from_results(&results).into_display_groups();
        prop_assert_eq!(groups.len(), 1);

        let summary = groups[0].summarize();
        let dice_sum: i64 = summary.per_die.iter().map(|&v| i64::from(v)).sum();
        prop_assert_eq!(summary.total, dice_sum + summary.total_bonus);
        prop_assert_eq!(summary.total_bonus, bonus);
        prop_assert_eq!(summary.per_die, draws);
    }
}
