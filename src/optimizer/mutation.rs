use crate::layout::Layout;
use fastrand::Rng;

/// Swaps the keys of two distinct, uniformly chosen characters.
/// Layouts with fewer than two characters come back unchanged.
pub fn swap_mutation(layout: &Layout, rng: &mut Rng) -> Layout {
    let n = layout.len();
    if n < 2 {
        return layout.clone();
    }

    let i = rng.usize(0..n);
    let mut j = rng.usize(0..n - 1);
    if j >= i {
        j += 1;
    }

    let chars: Vec<char> = layout.chars().collect();
    layout
        .swap(chars[i], chars[j])
        .unwrap_or_else(|_| layout.clone())
}
