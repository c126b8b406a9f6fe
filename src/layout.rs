use crate::error::{KeResult, KeyEvoError};
use crate::geometry::{Finger, Key, ROW_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// On-disk representation of a layout.
///
/// ```json
/// { "name": "azerty", "description": "...",
///   "keys": { "a": { "row": 0, "column": 0, "finger": "LEFT_PINKY" } },
///   "fixed_keys": { "^": { "row": 0, "column": 10, "finger": "RIGHT_PINKY" } } }
/// ```
///
/// `keys` are the characters the optimizer permutes. `fixed_keys` are typed
/// but never moved: dead keys, shift, keys outside the letter block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub keys: BTreeMap<String, Key>,
    #[serde(default, alias = "fixedKeys", skip_serializing_if = "BTreeMap::is_empty")]
    pub fixed_keys: BTreeMap<String, Key>,
}

/// An injective assignment of characters to physical keys.
///
/// The mapping is kept sorted by character, which is the canonical order used
/// for iteration, crossover and reports. Layouts are values: every edit
/// returns a new layout.
///
/// Fixed keys sit outside the permutation. A fixed key may share a board
/// position with a permuted one: keys above the top row (the AZERTY digit row)
/// are folded onto row 0, keeping their column and finger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    mapping: BTreeMap<char, Key>,
    fixed: Arc<BTreeMap<char, Key>>,
    // Overlay character -> base character whose key produces it.
    overlays: Arc<BTreeMap<char, char>>,
}

fn check_mapping(mapping: &BTreeMap<char, Key>) -> Result<(), String> {
    let mut seen: BTreeMap<(u8, u8), char> = BTreeMap::new();
    for (&c, key) in mapping {
        if key.row >= ROW_COUNT {
            return Err(format!(
                "key '{}' uses row {}, rows must be within 0..={}",
                c,
                key.row,
                ROW_COUNT - 1
            ));
        }
        if let Some(other) = seen.insert(key.position(), c) {
            return Err(format!(
                "characters '{}' and '{}' share position (row {}, column {})",
                other, c, key.row, key.column
            ));
        }
    }
    Ok(())
}

fn check_fixed(mapping: &BTreeMap<char, Key>, fixed: &BTreeMap<char, Key>) -> Result<(), String> {
    if let Some(c) = fixed.keys().find(|c| mapping.contains_key(*c)) {
        return Err(format!("'{}' is both a permuted and a fixed key", c));
    }
    check_mapping(fixed).map_err(|e| format!("fixed keys: {}", e))
}

/// Indexes every shift and AltGr character by the base character owning it.
/// Base characters always resolve to their own key, so an overlay naming one
/// is ignored.
fn index_overlays(
    mapping: &BTreeMap<char, Key>,
    fixed: &BTreeMap<char, Key>,
) -> Result<BTreeMap<char, char>, String> {
    let mut overlays = BTreeMap::new();
    for (&base, key) in mapping.iter().chain(fixed.iter()) {
        for c in key.overlays() {
            if mapping.contains_key(&c) || fixed.contains_key(&c) {
                continue;
            }
            if let Some(other) = overlays.insert(c, base) {
                return Err(format!(
                    "'{}' is produced by both the '{}' and the '{}' keys",
                    c, other, base
                ));
            }
        }
    }
    Ok(overlays)
}

impl Layout {
    pub fn new(name: impl Into<String>, mapping: BTreeMap<char, Key>) -> KeResult<Self> {
        Self::build(name.into(), mapping, BTreeMap::new()).map_err(KeyEvoError::Validation)
    }

    fn build(
        name: String,
        mapping: BTreeMap<char, Key>,
        fixed: BTreeMap<char, Key>,
    ) -> Result<Self, String> {
        check_mapping(&mapping)?;
        check_fixed(&mapping, &fixed)?;
        let overlays = index_overlays(&mapping, &fixed)?;
        Ok(Self {
            name,
            mapping,
            fixed: Arc::new(fixed),
            overlays: Arc::new(overlays),
        })
    }

    /// Replaces the keys that stay put during optimization.
    pub fn with_fixed_keys(self, fixed: BTreeMap<char, Key>) -> KeResult<Self> {
        Self::build(self.name, self.mapping, fixed).map_err(KeyEvoError::Validation)
    }

    /// Builds a layout whose mapping was derived from an already valid one
    /// (same skeleton, different permutation). Every character keeps its own
    /// overlays wherever it landed.
    pub(crate) fn derived(&self, mut mapping: BTreeMap<char, Key>) -> Self {
        for (c, key) in mapping.iter_mut() {
            if let Some(own) = self.mapping.get(c) {
                *key = key.with_overlays_of(own);
            }
        }
        debug_assert!(check_mapping(&mapping).is_ok());
        Self {
            name: self.name.clone(),
            mapping,
            fixed: Arc::clone(&self.fixed),
            overlays: Arc::clone(&self.overlays),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// The permuted key of `c`.
    #[inline(always)]
    pub fn lookup(&self, c: char) -> Option<&Key> {
        self.mapping.get(&c)
    }

    /// The key struck for keystroke `c`: its permuted key, its fixed key, or
    /// the key whose shift or AltGr layer produces it.
    #[inline]
    pub fn resolve(&self, c: char) -> Option<&Key> {
        self.base_key(c).or_else(|| {
            self.overlays
                .get(&c)
                .and_then(|&base| self.base_key(base))
        })
    }

    fn base_key(&self, c: char) -> Option<&Key> {
        self.mapping.get(&c).or_else(|| self.fixed.get(&c))
    }

    /// True when `c` has a key of its own, permuted or fixed.
    pub fn types_directly(&self, c: char) -> bool {
        self.base_key(c).is_some()
    }

    /// Every character with a key of its own, permuted ones first.
    pub fn direct_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.mapping.keys().chain(self.fixed.keys()).copied()
    }

    pub fn fixed_keys(&self) -> &BTreeMap<char, Key> {
        &self.fixed
    }

    pub fn contains(&self, c: char) -> bool {
        self.mapping.contains_key(&c)
    }

    pub fn mapping(&self) -> &BTreeMap<char, Key> {
        &self.mapping
    }

    /// Characters in canonical order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.mapping.keys().copied()
    }

    /// The physical skeleton, listed in the canonical character order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.mapping.values()
    }

    /// Exchanges the keys of `a` and `b`.
    pub fn swap(&self, a: char, b: char) -> KeResult<Layout> {
        let (ka, kb) = match (self.mapping.get(&a), self.mapping.get(&b)) {
            (Some(ka), Some(kb)) => (*ka, *kb),
            _ => {
                return Err(KeyEvoError::InvalidParameter(format!(
                    "cannot swap '{}' and '{}': both must be in layout '{}'",
                    a, b, self.name
                )))
            }
        };
        let mut mapping = self.mapping.clone();
        mapping.insert(a, kb);
        mapping.insert(b, ka);
        Ok(self.derived(mapping))
    }

    /// Position -> character, derived on demand.
    pub fn reverse_map(&self) -> BTreeMap<(u8, u8), char> {
        self.mapping
            .iter()
            .map(|(&c, key)| (key.position(), c))
            .collect()
    }

    pub fn is_injective(&self) -> bool {
        let positions: BTreeSet<(u8, u8)> = self.keys().map(Key::position).collect();
        positions.len() == self.mapping.len()
    }

    /// True when both layouts place keys on exactly the same physical board.
    /// Overlays travel with characters and are not part of the board.
    pub fn same_skeleton(&self, other: &Layout) -> bool {
        fn board(layout: &Layout) -> Vec<(u8, u8, Finger)> {
            let mut keys: Vec<_> = layout.keys().map(|k| (k.row, k.column, k.finger)).collect();
            keys.sort();
            keys
        }
        board(self) == board(other)
    }

    /// Lists `(initial_char, current_char)` for every position whose
    /// character changed relative to `initial`, in position order.
    pub fn swaps_from(&self, initial: &Layout) -> Vec<(char, char)> {
        let now = self.reverse_map();
        initial
            .reverse_map()
            .into_iter()
            .filter_map(|(pos, before)| match now.get(&pos) {
                Some(&after) if after != before => Some((before, after)),
                _ => None,
            })
            .collect()
    }

    /// Builds a layout from row strings (top row first), one character per
    /// column, with the standard column finger assignment.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> KeResult<Self> {
        let mut mapping = BTreeMap::new();
        for (row, line) in rows.iter().enumerate() {
            for (column, c) in line.chars().enumerate() {
                let key = Key::new(row as u8, column as u8, Finger::for_column(column as u8));
                if mapping.insert(c, key).is_some() {
                    return Err(KeyEvoError::Validation(format!(
                        "character '{}' appears twice in the row strings",
                        c
                    )));
                }
            }
        }
        Self::new(name, mapping)
    }

    pub fn from_config(config: LayoutConfig) -> KeResult<Self> {
        let mapping = char_keys(&config.name, config.keys)?;
        let fixed = char_keys(&config.name, config.fixed_keys)?;
        Self::build(config.name.clone(), mapping, fixed)
            .map_err(|e| KeyEvoError::ConfigParse(format!("layout '{}': {}", config.name, e)))
    }

    pub fn to_config(&self, description: &str) -> LayoutConfig {
        fn stringly(keys: &BTreeMap<char, Key>) -> BTreeMap<String, Key> {
            keys.iter().map(|(c, key)| (c.to_string(), *key)).collect()
        }
        LayoutConfig {
            name: self.name.clone(),
            description: description.to_string(),
            keys: stringly(&self.mapping),
            fixed_keys: stringly(&self.fixed),
        }
    }

    pub fn from_json_str(json: &str) -> KeResult<Self> {
        let config: LayoutConfig = serde_json::from_str(json)
            .map_err(|e| KeyEvoError::ConfigParse(format!("invalid layout document: {}", e)))?;
        Self::from_config(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let path = path.as_ref();
        debug!("Loading layout from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            KeyEvoError::ConfigParse(msg) => {
                KeyEvoError::ConfigParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, description: &str) -> KeResult<()> {
        let json = serde_json::to_string_pretty(&self.to_config(description))?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn char_keys(layout: &str, keys: BTreeMap<String, Key>) -> KeResult<BTreeMap<char, Key>> {
    let mut out = BTreeMap::new();
    for (name, key) in keys {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => out.insert(c, key),
            _ => {
                return Err(KeyEvoError::ConfigParse(format!(
                    "layout '{}': key '{}' must be exactly one character",
                    layout, name
                )))
            }
        };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Layout {
        let mut m = BTreeMap::new();
        m.insert('a', Key::new(1, 0, Finger::LeftPinky));
        m.insert('s', Key::new(1, 1, Finger::LeftRing));
        m.insert('d', Key::new(1, 2, Finger::LeftMiddle));
        Layout::new("tiny", m).unwrap()
    }

    #[test]
    fn test_swap_is_involution() {
        let l = tiny();
        let swapped = l.swap('a', 'd').unwrap();
        assert_eq!(swapped.lookup('a').unwrap().column, 2);
        assert_eq!(swapped.lookup('d').unwrap().column, 0);
        assert!(swapped.is_injective());
        assert_eq!(swapped.swap('a', 'd').unwrap(), l);
    }

    #[test]
    fn test_swap_requires_both_chars() {
        assert!(matches!(
            tiny().swap('a', 'z'),
            Err(KeyEvoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let mut m = BTreeMap::new();
        m.insert('a', Key::new(1, 0, Finger::LeftPinky));
        m.insert('b', Key::new(1, 0, Finger::LeftPinky));
        assert!(matches!(
            Layout::new("dup", m),
            Err(KeyEvoError::Validation(_))
        ));
    }

    #[test]
    fn test_overlays_follow_their_character() {
        let mut m = tiny().mapping().clone();
        let a = Key { shift_produces: Some('A'), ..m[&'a'] };
        m.insert('a', a);
        let l = Layout::new("tiny", m).unwrap();

        let swapped = l.swap('a', 'd').unwrap();
        assert_eq!(swapped.lookup('a').unwrap().shift_produces, Some('A'));
        assert_eq!(swapped.lookup('d').unwrap().shift_produces, None);
        assert_eq!(swapped.resolve('A'), swapped.lookup('a'));
        assert!(swapped.same_skeleton(&l));
    }

    #[test]
    fn test_resolve_prefers_base_then_fixed_then_overlay() {
        let mut fixed = BTreeMap::new();
        fixed.insert('^', Key { shift_produces: Some('¨'), ..Key::new(0, 10, Finger::RightPinky) });
        // Folded onto the position of 'a'.
        fixed.insert('&', Key::new(1, 0, Finger::LeftPinky));
        let l = tiny().with_fixed_keys(fixed).unwrap();

        assert_eq!(l.resolve('s'), l.lookup('s'));
        assert_eq!(l.resolve('^').unwrap().column, 10);
        assert_eq!(l.resolve('¨').unwrap().column, 10);
        assert_eq!(l.resolve('&').unwrap().finger, Finger::LeftPinky);
        assert!(l.resolve('z').is_none());
        assert!(l.lookup('^').is_none());
        assert!(l.types_directly('^') && !l.types_directly('¨'));
        assert_eq!(l.len(), 3);

        // Fixed keys survive the permutation.
        let moved = l.swap('a', 's').unwrap();
        assert_eq!(moved.fixed_keys(), l.fixed_keys());
        assert_eq!(moved.resolve('¨'), l.resolve('¨'));
    }

    #[test]
    fn test_fixed_keys_are_validated() {
        let clash = BTreeMap::from([('a', Key::new(0, 10, Finger::RightPinky))]);
        assert!(matches!(
            tiny().with_fixed_keys(clash),
            Err(KeyEvoError::Validation(_))
        ));

        let stacked = BTreeMap::from([
            ('^', Key::new(0, 10, Finger::RightPinky)),
            ('$', Key::new(0, 10, Finger::RightPinky)),
        ]);
        assert!(tiny().with_fixed_keys(stacked).is_err());

        let twice = BTreeMap::from([
            ('^', Key { shift_produces: Some('¨'), ..Key::new(0, 10, Finger::RightPinky) }),
            ('$', Key { shift_produces: Some('¨'), ..Key::new(0, 11, Finger::RightPinky) }),
        ]);
        let err = tiny().with_fixed_keys(twice).unwrap_err();
        assert!(err.to_string().contains("produced by both"), "{}", err);
    }

    #[test]
    fn test_swaps_from_lists_changed_positions() {
        let l = tiny();
        let moved = l.swap('a', 's').unwrap();
        assert_eq!(moved.swaps_from(&l), vec![('a', 's'), ('s', 'a')]);
        assert!(l.swaps_from(&l).is_empty());
    }
}
