mod common;

use common::qwerty;
use keyevo::config::MovementWeights;
use keyevo::corpus::{FrequencyTable, NgramCounter};
use keyevo::geometry::Finger;
use keyevo::layout::Layout;
use keyevo::optimizer::crossover::single_point_crossover;
use keyevo::optimizer::mutation::swap_mutation;
use keyevo::scorer::engine::evaluate;
use keyevo::scorer::Movement;
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_weights()(
        penalty in 0.0..10.0f64,
        stretch in 0.0..10.0f64,
        scissor in 0.0..10.0f64,
        bonus in -5.0..0.0f64
    ) -> MovementWeights {
        MovementWeights {
            same_finger: penalty,
            lateral_stretch: stretch,
            scissors: scissor,
            hand_alternation: bonus,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_text()(words in proptest::collection::vec("[a-z;,./]{1,8}", 1..40)) -> String {
        words.join(" ")
    }
}

prop_compose! {
    fn arb_layout()(seed in any::<u64>(), swaps in 0usize..60) -> Layout {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut layout = qwerty();
        for _ in 0..swaps {
            layout = swap_mutation(&layout, &mut rng);
        }
        layout
    }
}

fn counted(text: &str) -> FrequencyTable {
    NgramCounter::new().count_text(text)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_score_stability(
        weights in arb_weights(),
        layout in arb_layout(),
        text in arb_text()
    ) {
        let table = counted(&text);
        let res = evaluate(&layout, &table, &weights);

        prop_assert!(res.score.is_finite());
        prop_assert_eq!(evaluate(&layout, &table, &weights), res.clone());

        // Every typed character lands on exactly one finger or is unplaced.
        let load: f64 = Finger::ALL.iter().map(|&f| res.finger_load[f]).sum();
        prop_assert!((load + res.unplaced_load - 100.0).abs() < 1e-6);

        // Trigram categories never exceed the trigram mass.
        prop_assert!(res.counts[Movement::Redirection] + res.counts[Movement::BadRedirection]
            <= res.total_trigrams);
        prop_assert!(res.counts[Movement::SameFinger] <= res.total_bigrams);
    }

    #[test]
    fn test_fully_placed_text_loads_all_fingers(layout in arb_layout()) {
        let text: String = layout.chars().collect();
        let res = evaluate(&layout, &counted(&text), &MovementWeights::default());
        let load: f64 = res.finger_load.0.iter().sum();
        prop_assert!((load - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_operators_preserve_permutation(
        p1 in arb_layout(),
        p2 in arb_layout(),
        seed in any::<u64>()
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let order: Vec<char> = p1.chars().collect();
        let (c1, c2) = single_point_crossover(&p1, &p2, &order, &mut rng);
        let m = swap_mutation(&c1, &mut rng);

        for child in [&c1, &c2, &m] {
            prop_assert!(child.is_injective());
            prop_assert!(child.same_skeleton(&p1));
            prop_assert!(child.chars().eq(p1.chars()));
        }
    }
}
