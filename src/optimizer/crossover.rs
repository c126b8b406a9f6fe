use crate::geometry::Key;
use crate::layout::Layout;
use fastrand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Single-point crossover over the canonical character `order`.
///
/// A cut `k` is drawn in `[0, n)`. The first child takes `p1`'s keys for
/// `order[..k]` and `p2`'s keys for the rest; the second child mirrors it.
/// Suffix keys already claimed by the prefix are resolved with the
/// partially-mapped chain (key -> prefix char owning it -> that char's key in
/// the suffix parent), so children are permutations of the parents' skeleton.
///
/// Parents that do not share characters and skeleton are returned unchanged.
pub fn single_point_crossover(
    p1: &Layout,
    p2: &Layout,
    order: &[char],
    rng: &mut Rng,
) -> (Layout, Layout) {
    let n = order.len();
    if n == 0 || !compatible(p1, p2, order) {
        return (p1.clone(), p2.clone());
    }

    let k = rng.usize(0..n);
    let c1 = pmx_child(p1, p2, order, k).map_or_else(|| p1.clone(), |m| p1.derived(m));
    let c2 = pmx_child(p2, p1, order, k).map_or_else(|| p2.clone(), |m| p2.derived(m));
    (c1, c2)
}

fn compatible(p1: &Layout, p2: &Layout, order: &[char]) -> bool {
    p1.len() == order.len()
        && p2.len() == order.len()
        && order.iter().all(|&c| p1.contains(c) && p2.contains(c))
        && p1.same_skeleton(p2)
}

fn pmx_child(
    prefix: &Layout,
    suffix: &Layout,
    order: &[char],
    k: usize,
) -> Option<BTreeMap<char, Key>> {
    let mut mapping = BTreeMap::new();
    let mut used: HashSet<(u8, u8)> = HashSet::with_capacity(order.len());
    // Position -> prefix character holding it in the child.
    let mut owner: HashMap<(u8, u8), char> = HashMap::with_capacity(k);

    for &c in &order[..k] {
        let key = *prefix.lookup(c)?;
        used.insert(key.position());
        owner.insert(key.position(), c);
        mapping.insert(c, key);
    }

    for &c in &order[k..] {
        let mut key = *suffix.lookup(c)?;
        let mut hops = 0;
        while let Some(&holder) = owner.get(&key.position()) {
            key = *suffix.lookup(holder)?;
            hops += 1;
            if hops > k {
                return None;
            }
        }
        if !used.insert(key.position()) {
            return None;
        }
        mapping.insert(c, key);
    }

    Some(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::mutation::swap_mutation;
    use proptest::prelude::*;

    fn block() -> Layout {
        Layout::from_rows("block", &["qwertyuiop", "asdfghjkl;", "zxcvbnm,./"]).unwrap()
    }

    fn scrambled(seed: u64, swaps: usize) -> Layout {
        let mut rng = Rng::with_seed(seed);
        let mut l = block();
        for _ in 0..swaps {
            l = swap_mutation(&l, &mut rng);
        }
        l
    }

    #[test]
    fn test_identical_parents_give_identical_children() {
        let p = block();
        let order: Vec<char> = p.chars().collect();
        let mut rng = Rng::with_seed(5);
        for _ in 0..20 {
            let (a, b) = single_point_crossover(&p, &p, &order, &mut rng);
            assert_eq!(a, p);
            assert_eq!(b, p);
        }
    }

    #[test]
    fn test_prefix_comes_from_first_parent() {
        let p1 = block();
        let p2 = scrambled(9, 40);
        let order: Vec<char> = p1.chars().collect();
        // Cut 0 hands the whole mapping to the suffix parent.
        let child = pmx_child(&p1, &p2, &order, 0).unwrap();
        assert_eq!(&child, p2.mapping());

        let k = 12;
        let child = pmx_child(&p1, &p2, &order, k).unwrap();
        for c in &order[..k] {
            assert_eq!(child[c], *p1.lookup(*c).unwrap());
        }
    }

    #[test]
    fn test_mismatched_parents_are_copied() {
        let p1 = block();
        let p2 = Layout::from_rows("other", &["abc"]).unwrap();
        let order: Vec<char> = p1.chars().collect();
        let mut rng = Rng::with_seed(1);
        let (a, b) = single_point_crossover(&p1, &p2, &order, &mut rng);
        assert_eq!(a, p1);
        assert_eq!(b, p2);
    }

    proptest! {
        #[test]
        fn prop_children_are_permutations(s1 in any::<u64>(), s2 in any::<u64>(), seed in any::<u64>()) {
            let p1 = scrambled(s1, 30);
            let p2 = scrambled(s2, 30);
            let order: Vec<char> = block().chars().collect();
            let mut rng = Rng::with_seed(seed);
            let (a, b) = single_point_crossover(&p1, &p2, &order, &mut rng);
            for child in [&a, &b] {
                prop_assert!(child.is_injective());
                prop_assert!(child.same_skeleton(&p1));
                prop_assert_eq!(child.len(), 30);
            }
        }
    }
}
