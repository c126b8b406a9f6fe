use crate::geometry::{Finger, Hand};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum_macros::{Display, EnumIter, EnumString};

/// Ergonomic movement categories recognised by the classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Movement {
    SameFinger,
    LateralStretch,
    Scissors,
    HandAlternation,
    InwardRoll,
    OutwardRoll,
    Redirection,
    BadRedirection,
    SameFingerSkipgram,
}

impl Movement {
    pub const COUNT: usize = 9;

    pub const ALL: [Movement; Movement::COUNT] = [
        Movement::SameFinger,
        Movement::LateralStretch,
        Movement::Scissors,
        Movement::HandAlternation,
        Movement::InwardRoll,
        Movement::OutwardRoll,
        Movement::Redirection,
        Movement::BadRedirection,
        Movement::SameFingerSkipgram,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of keys the category looks at: 2 for bigram, 3 for trigram categories.
    pub fn arity(self) -> usize {
        match self {
            Movement::Redirection | Movement::BadRedirection | Movement::SameFingerSkipgram => 3,
            _ => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Movement::SameFinger => "Same finger",
            Movement::LateralStretch => "Lateral stretch",
            Movement::Scissors => "Scissors",
            Movement::HandAlternation => "Hand alternation",
            Movement::InwardRoll => "Inward roll",
            Movement::OutwardRoll => "Outward roll",
            Movement::Redirection => "Redirection",
            Movement::BadRedirection => "Bad redirection",
            Movement::SameFingerSkipgram => "Same finger skipgram",
        }
    }
}

/// Fixed-size table indexed by [`Movement`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerMovement<T>(pub [T; Movement::COUNT]);

impl<T> Index<Movement> for PerMovement<T> {
    type Output = T;
    fn index(&self, m: Movement) -> &T {
        &self.0[m.index()]
    }
}

impl<T> IndexMut<Movement> for PerMovement<T> {
    fn index_mut(&mut self, m: Movement) -> &mut T {
        &mut self.0[m.index()]
    }
}

/// Fixed-size table indexed by [`Finger`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerFinger<T>(pub [T; Finger::COUNT]);

impl<T> Index<Finger> for PerFinger<T> {
    type Output = T;
    fn index(&self, f: Finger) -> &T {
        &self.0[f.ordinal()]
    }
}

impl<T> IndexMut<Finger> for PerFinger<T> {
    fn index_mut(&mut self, f: Finger) -> &mut T {
        &mut self.0[f.ordinal()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationResult {
    /// Weighted penalty; lower is better.
    pub score: f64,
    pub counts: PerMovement<u64>,
    /// weight x count for each category.
    pub contributions: PerMovement<f64>,
    /// Percentage of all typed characters landing on each finger.
    pub finger_load: PerFinger<f64>,
    /// Percentage of typed characters with no key (whitespace, symbols the
    /// layout lacks). Finger loads and this add up to 100.
    pub unplaced_load: f64,
    /// Sum of |load - ideal| over the eight fingers.
    pub finger_load_deviation: f64,

    // Frequency mass of the table, present in the layout or not.
    pub total_monograms: u64,
    pub total_bigrams: u64,
    pub total_trigrams: u64,
}

impl EvaluationResult {
    /// Count of a category as a percentage of the bigram or trigram mass.
    pub fn share(&self, m: Movement) -> f64 {
        let total = if m.arity() == 2 {
            self.total_bigrams
        } else {
            self.total_trigrams
        };
        if total == 0 {
            0.0
        } else {
            self.counts[m] as f64 * 100.0 / total as f64
        }
    }

    pub fn bigram_subtotal(&self) -> f64 {
        self.subtotal(2)
    }

    pub fn trigram_subtotal(&self) -> f64 {
        self.subtotal(3)
    }

    fn subtotal(&self, arity: usize) -> f64 {
        Movement::ALL
            .iter()
            .filter(|m| m.arity() == arity)
            .map(|&m| self.contributions[m])
            .sum()
    }

    pub fn hand_share(&self, hand: Hand) -> f64 {
        Finger::ALL
            .iter()
            .filter(|f| f.hand() == hand)
            .map(|&f| self.finger_load[f])
            .sum()
    }
}
