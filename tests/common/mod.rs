#![allow(dead_code)]

use keyevo::config::MovementWeights;
use keyevo::corpus::FrequencyTable;
use keyevo::geometry::{Finger, Key};
use keyevo::layout::Layout;
use keyevo::scorer::Scorer;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const EPS: f64 = 1e-9;

/// Builder for Key to clean up tests
pub struct KeyBuilder {
    key: Key,
}

impl KeyBuilder {
    pub fn new(row: u8, column: u8) -> Self {
        Self {
            key: Key::new(row, column, Finger::for_column(column)),
        }
    }

    pub fn finger(mut self, finger: Finger) -> Self {
        self.key.finger = finger;
        self
    }

    pub fn shift(mut self, c: char) -> Self {
        self.key.shift_produces = Some(c);
        self
    }

    pub fn build(self) -> Key {
        self.key
    }
}

/// Shorthand for a key with an explicit finger.
pub fn key(row: u8, column: u8, finger: Finger) -> Key {
    KeyBuilder::new(row, column).finger(finger).build()
}

pub fn layout_of(entries: &[(char, Key)]) -> Layout {
    let mapping: BTreeMap<char, Key> = entries.iter().copied().collect();
    Layout::new("test", mapping).unwrap()
}

pub fn table_of(pairs: &[(&str, u64)]) -> FrequencyTable {
    FrequencyTable::from_pairs(pairs.iter().copied())
}

pub fn scorer_for(pairs: &[(&str, u64)]) -> Scorer {
    Scorer::new(Arc::new(table_of(pairs)), MovementWeights::default())
}

pub fn qwerty() -> Layout {
    Layout::from_rows("qwerty", &["qwertyuiop", "asdfghjkl;", "zxcvbnm,./"]).unwrap()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}
