use crate::geometry::{Hand, Key};

/// Every two-key verdict of the classifier for one ordered key pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyInteraction {
    pub is_same_hand: bool,
    pub is_same_finger: bool,
    pub is_lateral_stretch: bool,
    pub is_scissor: bool,
    pub is_hand_alternation: bool,

    // Roll Analysis (Bigram)
    pub is_roll_in: bool,
    pub is_roll_out: bool,
}

#[inline(always)]
pub fn same_finger(a: &Key, b: &Key) -> bool {
    a.finger == b.finger
}

#[inline(always)]
pub fn same_hand(a: &Key, b: &Key) -> bool {
    a.hand() == b.hand()
}

#[inline(always)]
pub fn hand_alternation(a: &Key, b: &Key) -> bool {
    !same_hand(a, b)
}

/// Same hand, three or more columns apart.
#[inline(always)]
pub fn lateral_stretch(a: &Key, b: &Key) -> bool {
    same_hand(a, b) && a.column.abs_diff(b.column) >= 3
}

/// Same hand, moving toward the centre of the board.
/// On the left hand the column grows, on the right hand it shrinks.
#[inline(always)]
pub fn inward_roll(a: &Key, b: &Key) -> bool {
    if !same_hand(a, b) {
        return false;
    }
    match a.hand() {
        Hand::Left => a.column < b.column,
        Hand::Right => a.column > b.column,
    }
}

/// Same hand, the second finger is the next one outward of the first
/// (index -> middle -> ring -> pinky).
#[inline(always)]
pub fn outward_roll(a: &Key, b: &Key) -> bool {
    a.finger.outward_neighbor() == Some(b.finger)
}

/// Neighbouring fingers of one hand jumping across two rows.
#[inline(always)]
pub fn scissors(a: &Key, b: &Key) -> bool {
    same_hand(a, b)
        && a.finger.ordinal().abs_diff(b.finger.ordinal()) == 1
        && a.row.abs_diff(b.row) >= 2
}

pub fn analyze_interaction(a: &Key, b: &Key) -> KeyInteraction {
    let mut res = KeyInteraction::default();

    if !same_hand(a, b) {
        res.is_hand_alternation = true;
        return res;
    }
    res.is_same_hand = true;
    res.is_same_finger = same_finger(a, b);
    res.is_lateral_stretch = lateral_stretch(a, b);
    res.is_scissor = scissors(a, b);

    res.is_roll_in = inward_roll(a, b);
    // A column motion toward the centre is never also charged as an outward roll.
    res.is_roll_out = !res.is_roll_in && outward_roll(a, b);

    res
}
