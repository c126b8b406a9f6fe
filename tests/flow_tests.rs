mod common;

use common::KeyBuilder;
use keyevo::geometry::{Finger, Key};
use keyevo::scorer::flow::{
    analyze_flow, bad_redirection, redirection, same_finger_skipgram, FlowAnalysis,
};
use proptest::prelude::*;

// Left hand home row: pinky 0, ring 1, middle 2, index 3
fn a() -> Key { KeyBuilder::new(1, 0).build() }
fn s() -> Key { KeyBuilder::new(1, 1).build() }
fn d() -> Key { KeyBuilder::new(1, 2).build() }
fn f() -> Key { KeyBuilder::new(1, 3).build() }
fn r() -> Key { KeyBuilder::new(0, 3).build() }
fn q() -> Key { KeyBuilder::new(0, 0).build() }
fn z() -> Key { KeyBuilder::new(2, 0).build() }
fn j() -> Key { KeyBuilder::new(1, 6).build() }

#[test]
fn test_trigram_flow_detection() {
    // 1. Monotone run, no direction change
    let run = analyze_flow(&a(), &s(), &d());
    assert_eq!(run, FlowAnalysis::default());

    // 2. Redirect (Middle -> Pinky -> Ring) (2 -> 0 -> 1)
    let redir = analyze_flow(&d(), &a(), &s());
    assert!(redir.is_redirect, "D->A->S should be a redirect");
    assert!(!redir.is_bad_redirect, "No step spans three columns");

    // 3. Same redirect opened with a stretch (3 -> 0 -> 1)
    let bad = analyze_flow(&f(), &a(), &s());
    assert!(bad.is_bad_redirect, "F->A->S stretches on the first step");
    assert!(!bad.is_redirect, "The bad variant replaces the plain one");

    // 4. ABA is a redirect and a skipgram
    let aba = analyze_flow(&s(), &d(), &s());
    assert!(aba.is_redirect);
    assert!(aba.is_skip);
}

#[test]
fn test_vertical_step_is_not_a_direction() {
    // F -> R keeps the column, so there is no direction to reverse.
    assert!(!redirection(&f(), &r(), &d()));
    assert!(!analyze_flow(&f(), &r(), &d()).is_redirect);
}

#[test]
fn test_cross_hand_trigrams() {
    let flow = analyze_flow(&a(), &j(), &s());
    assert!(!flow.is_redirect && !flow.is_bad_redirect && !flow.is_skip);

    // The skipgram ignores the middle key entirely.
    let skip = analyze_flow(&q(), &j(), &z());
    assert!(skip.is_skip, "Q and Z share the left pinky");
    assert!(!skip.is_redirect);
    assert!(same_finger_skipgram(&q(), &j(), &z()));
}

#[test]
fn test_skipgram_follows_finger_assignment() {
    let left_index = KeyBuilder::new(1, 2).finger(Finger::LeftIndex).build();
    assert!(same_finger_skipgram(&f(), &a(), &left_index));
    assert!(!same_finger_skipgram(&f(), &a(), &d()));
}

prop_compose! {
    fn arb_key()(row in 0u8..3, column in 0u8..10, f in 0usize..8) -> Key {
        KeyBuilder::new(row, column).finger(Finger::ALL[f]).build()
    }
}

proptest! {
    #[test]
    fn prop_bad_redirect_implies_redirect(k1 in arb_key(), k2 in arb_key(), k3 in arb_key()) {
        if bad_redirection(&k1, &k2, &k3) {
            prop_assert!(redirection(&k1, &k2, &k3));
        }
    }

    #[test]
    fn prop_flow_matches_predicates(k1 in arb_key(), k2 in arb_key(), k3 in arb_key()) {
        let flow = analyze_flow(&k1, &k2, &k3);
        prop_assert!(!(flow.is_redirect && flow.is_bad_redirect));
        prop_assert_eq!(flow.is_bad_redirect, bad_redirection(&k1, &k2, &k3));
        prop_assert_eq!(
            flow.is_redirect,
            redirection(&k1, &k2, &k3) && !bad_redirection(&k1, &k2, &k3)
        );
        prop_assert_eq!(flow.is_skip, same_finger_skipgram(&k1, &k2, &k3));
    }
}
