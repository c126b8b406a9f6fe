use super::flow::analyze_flow;
use super::physics::analyze_interaction;
use super::types::{EvaluationResult, Movement};
use crate::config::MovementWeights;
use crate::corpus::FrequencyTable;
use crate::geometry::Finger;
use crate::layout::Layout;

/// Scores `layout` against the frequency table.
///
/// A pure fold: counts are accumulated as integers in table order and the
/// weighted score is derived from them at the end, so the result does not
/// depend on evaluation order or on other evaluations running concurrently.
/// Characters are resolved with [`Layout::resolve`]; n-grams with a keystroke
/// the layout cannot type contribute nothing, and their monogram share is
/// reported as `unplaced_load`.
pub fn evaluate(
    layout: &Layout,
    table: &FrequencyTable,
    weights: &MovementWeights,
) -> EvaluationResult {
    let mut res = EvaluationResult {
        total_monograms: table.total_monograms(),
        total_bigrams: table.total_bigrams(),
        total_trigrams: table.total_trigrams(),
        ..Default::default()
    };

    // 1. Finger load (percent of every typed character, placed or not)
    let n = table.total_monograms();
    if n > 0 {
        let scale = 100.0 / n as f64;
        for &(c, freq) in table.monograms() {
            match layout.resolve(c) {
                Some(k) => res.finger_load[k.finger] += freq as f64 * scale,
                None => res.unplaced_load += freq as f64 * scale,
            }
        }
    }

    // 2. Bigrams
    for &([c1, c2], freq) in table.bigrams() {
        let (Some(k1), Some(k2)) = (layout.resolve(c1), layout.resolve(c2)) else {
            continue;
        };
        let it = analyze_interaction(k1, k2);

        if it.is_same_finger {
            res.counts[Movement::SameFinger] += freq;
        }
        if it.is_lateral_stretch {
            res.counts[Movement::LateralStretch] += freq;
        }
        if it.is_scissor {
            res.counts[Movement::Scissors] += freq;
        }
        if it.is_hand_alternation {
            res.counts[Movement::HandAlternation] += freq;
        }
        if it.is_roll_in {
            res.counts[Movement::InwardRoll] += freq;
        }
        if it.is_roll_out {
            res.counts[Movement::OutwardRoll] += freq;
        }
    }

    // 3. Trigrams
    for &([c1, c2, c3], freq) in table.trigrams() {
        let (Some(k1), Some(k2), Some(k3)) =
            (layout.resolve(c1), layout.resolve(c2), layout.resolve(c3))
        else {
            continue;
        };
        let flow = analyze_flow(k1, k2, k3);

        if flow.is_bad_redirect {
            res.counts[Movement::BadRedirection] += freq;
        } else if flow.is_redirect {
            res.counts[Movement::Redirection] += freq;
        }
        if flow.is_skip {
            res.counts[Movement::SameFingerSkipgram] += freq;
        }
    }

    // 4. Weighted total
    let mut score = 0.0;
    for m in Movement::ALL {
        let contribution = weights.weight(m) * res.counts[m] as f64;
        res.contributions[m] = contribution;
        score += contribution;
    }

    let ideal = weights.ideal_load();
    res.finger_load_deviation = Finger::ALL
        .iter()
        .map(|&f| (res.finger_load[f] - ideal[f]).abs())
        .sum();
    if weights.finger_load_weight != 0.0 {
        score += weights.finger_load_weight * res.finger_load_deviation;
    }

    res.score = score;
    res
}
