use crate::geometry::Key;
use crate::scorer::physics::{lateral_stretch, same_finger, same_hand};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlowAnalysis {
    pub is_redirect: bool,     // Direction change, e.g. columns 2 -> 0 -> 1
    pub is_bad_redirect: bool, // Redirect with a lateral stretch in either step
    pub is_skip: bool,         // First and last key on the same finger
}

/// Same hand throughout, and the column direction flips between the two steps.
pub fn redirection(a: &Key, b: &Key, c: &Key) -> bool {
    if !(same_hand(a, b) && same_hand(b, c)) {
        return false;
    }
    let dir1 = (b.column as i16 - a.column as i16).signum();
    let dir2 = (c.column as i16 - b.column as i16).signum();
    dir1 != 0 && dir2 != 0 && dir1 != dir2
}

pub fn bad_redirection(a: &Key, b: &Key, c: &Key) -> bool {
    redirection(a, b, c) && (lateral_stretch(a, b) || lateral_stretch(b, c))
}

pub fn same_finger_skipgram(a: &Key, _b: &Key, c: &Key) -> bool {
    same_finger(a, c)
}

pub fn analyze_flow(a: &Key, b: &Key, c: &Key) -> FlowAnalysis {
    let mut res = FlowAnalysis {
        is_skip: same_finger_skipgram(a, b, c),
        ..Default::default()
    };

    if redirection(a, b, c) {
        // The bad variant replaces the plain one.
        if lateral_stretch(a, b) || lateral_stretch(b, c) {
            res.is_bad_redirect = true;
        } else {
            res.is_redirect = true;
        }
    }

    res
}
