use fastrand::Rng;

/// Draws `size` contestants with replacement and returns the index of the one
/// with the lowest score. On ties the earlier draw wins.
///
/// `scores` must not be empty.
pub fn tournament_select(scores: &[f64], size: usize, rng: &mut Rng) -> usize {
    let len = scores.len();
    let mut best = rng.usize(0..len);
    for _ in 1..size.max(1) {
        let idx = rng.usize(0..len);
        if scores[idx] < scores[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_contestant_is_uniform_draw() {
        let scores = [3.0, 1.0, 2.0];
        let mut rng = Rng::with_seed(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[tournament_select(&scores, 1, &mut rng)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_large_tournament_finds_minimum() {
        let scores = [5.0, 4.0, -1.0, 9.0];
        let mut rng = Rng::with_seed(1);
        // 64 draws over 4 entries miss index 2 with negligible probability.
        for _ in 0..20 {
            assert_eq!(tournament_select(&scores, 64, &mut rng), 2);
        }
    }

    #[test]
    fn test_single_entry_population() {
        let mut rng = Rng::with_seed(3);
        assert_eq!(tournament_select(&[0.5], 3, &mut rng), 0);
    }
}
