use crate::accents;
use crate::config::CorpusOptions;
use crate::layout::Layout;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Frozen n-gram counts, partitioned by length.
///
/// Each partition is sorted by count (descending) and then by the n-gram
/// itself, so iteration order is deterministic no matter how the counts were
/// produced. Callers that only need a lookup can treat it as one table via
/// [`FrequencyTable::get`] and [`FrequencyTable::iter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    monograms: Vec<(char, u64)>,
    bigrams: Vec<([char; 2], u64)>,
    trigrams: Vec<([char; 3], u64)>,
    total_monograms: u64,
    total_bigrams: u64,
    total_trigrams: u64,
}

fn freeze<K: Ord + Copy>(map: HashMap<K, u64>) -> (Vec<(K, u64)>, u64) {
    let mut entries: Vec<(K, u64)> = map.into_iter().filter(|&(_, n)| n > 0).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let total = entries.iter().map(|&(_, n)| n).sum();
    (entries, total)
}

impl FrequencyTable {
    fn from_maps(counts: NgramCounts) -> Self {
        let (monograms, total_monograms) = freeze(counts.monograms);
        let (bigrams, total_bigrams) = freeze(counts.bigrams);
        let (trigrams, total_trigrams) = freeze(counts.trigrams);
        Self {
            monograms,
            bigrams,
            trigrams,
            total_monograms,
            total_bigrams,
            total_trigrams,
        }
    }

    /// Builds a table from `(ngram, count)` pairs. Repeated n-grams are summed;
    /// entries whose length is not 1..=3 characters are ignored.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut counts = NgramCounts::default();
        for (ngram, n) in pairs {
            counts.add(ngram.as_ref(), n);
        }
        Self::from_maps(counts)
    }

    pub fn monograms(&self) -> &[(char, u64)] {
        &self.monograms
    }

    pub fn bigrams(&self) -> &[([char; 2], u64)] {
        &self.bigrams
    }

    pub fn trigrams(&self) -> &[([char; 3], u64)] {
        &self.trigrams
    }

    pub fn total_monograms(&self) -> u64 {
        self.total_monograms
    }

    pub fn total_bigrams(&self) -> u64 {
        self.total_bigrams
    }

    pub fn total_trigrams(&self) -> u64 {
        self.total_trigrams
    }

    pub fn len(&self) -> usize {
        self.monograms.len() + self.bigrams.len() + self.trigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of an n-gram, 0 when absent.
    pub fn get(&self, ngram: &str) -> u64 {
        let chars: Vec<char> = ngram.chars().collect();
        let hit = match chars.as_slice() {
            [a] => self.monograms.iter().find(|(c, _)| c == a).map(|e| e.1),
            [a, b] => self
                .bigrams
                .iter()
                .find(|(k, _)| k == &[*a, *b])
                .map(|e| e.1),
            [a, b, c] => self
                .trigrams
                .iter()
                .find(|(k, _)| k == &[*a, *b, *c])
                .map(|e| e.1),
            _ => None,
        };
        hit.unwrap_or(0)
    }

    /// All entries as strings: monograms first, then bigrams, then trigrams.
    pub fn iter(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        let mono = self.monograms.iter().map(|(c, n)| (c.to_string(), *n));
        let bi = self
            .bigrams
            .iter()
            .map(|(k, n)| (k.iter().collect::<String>(), *n));
        let tri = self
            .trigrams
            .iter()
            .map(|(k, n)| (k.iter().collect::<String>(), *n));
        mono.chain(bi).chain(tri)
    }

    /// Every count multiplied by `factor` (saturating).
    pub fn scaled(&self, factor: u64) -> Self {
        Self::from_pairs(self.iter().map(|(k, n)| (k, n.saturating_mul(factor))))
    }
}

#[derive(Debug, Default)]
struct NgramCounts {
    monograms: HashMap<char, u64>,
    bigrams: HashMap<[char; 2], u64>,
    trigrams: HashMap<[char; 3], u64>,
}

impl NgramCounts {
    fn add(&mut self, ngram: &str, n: u64) {
        let chars: Vec<char> = ngram.chars().collect();
        match chars.as_slice() {
            [a] => *self.monograms.entry(*a).or_default() += n,
            [a, b] => *self.bigrams.entry([*a, *b]).or_default() += n,
            [a, b, c] => *self.trigrams.entry([*a, *b, *c]).or_default() += n,
            _ => {}
        }
    }

    fn add_sequence(&mut self, chars: &[char]) {
        for &c in chars {
            *self.monograms.entry(c).or_default() += 1;
        }
        for w in chars.windows(2) {
            *self.bigrams.entry([w[0], w[1]]).or_default() += 1;
        }
        for w in chars.windows(3) {
            *self.trigrams.entry([w[0], w[1], w[2]]).or_default() += 1;
        }
    }

    fn merge(mut self, other: NgramCounts) -> NgramCounts {
        for (k, v) in other.monograms {
            *self.monograms.entry(k).or_default() += v;
        }
        for (k, v) in other.bigrams {
            *self.bigrams.entry(k).or_default() += v;
        }
        for (k, v) in other.trigrams {
            *self.trigrams.entry(k).or_default() += v;
        }
        self
    }
}

/// Counts contiguous 1-, 2- and 3-character windows over a set of texts.
/// Windows never span two texts.
#[derive(Debug, Clone, Default)]
pub struct NgramCounter {
    lowercase: bool,
    expand_accents: bool,
    // Characters the target layout types directly; expansion skips them.
    direct: BTreeSet<char>,
}

impl NgramCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(opts: &CorpusOptions) -> Self {
        Self {
            lowercase: opts.lowercase,
            expand_accents: opts.expand_accents,
            direct: BTreeSet::new(),
        }
    }

    pub fn lowercase(mut self, on: bool) -> Self {
        self.lowercase = on;
        self
    }

    pub fn expand_accents(mut self, on: bool) -> Self {
        self.expand_accents = on;
        self
    }

    /// Counts keystrokes for `layout`: accented characters it has a key for
    /// stay whole.
    pub fn for_layout(mut self, layout: &Layout) -> Self {
        self.direct = layout.direct_chars().collect();
        self
    }

    /// The keystroke sequence that will be counted for `text`.
    pub fn prepare(&self, text: &str) -> Vec<char> {
        let folded = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if self.expand_accents {
            accents::expand_keeping(&folded, |c| self.direct.contains(&c))
                .chars()
                .collect()
        } else {
            folded.chars().collect()
        }
    }

    pub fn count_text(&self, text: &str) -> FrequencyTable {
        self.count_all(&[text])
    }

    /// Counts every text in parallel and merges the partial tables.
    pub fn count_all<S: AsRef<str> + Sync>(&self, texts: &[S]) -> FrequencyTable {
        let counts = texts
            .par_iter()
            .fold(NgramCounts::default, |mut acc, text| {
                acc.add_sequence(&self.prepare(text.as_ref()));
                acc
            })
            .reduce(NgramCounts::default, NgramCounts::merge);
        FrequencyTable::from_maps(counts)
    }
}
