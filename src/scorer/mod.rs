pub mod engine;
pub mod flow;
pub mod loader;
pub mod physics;
pub mod types;

pub use self::types::{EvaluationResult, Movement};
use crate::config::{CorpusOptions, MovementWeights};
use crate::corpus::FrequencyTable;
use crate::error::KeResult;
use crate::layout::Layout;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Evaluates layouts against one shared, read-only frequency table.
///
/// Holds no per-evaluation state, so a single instance can be shared across
/// threads behind an `Arc` and called concurrently.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub weights: MovementWeights,
    table: Arc<FrequencyTable>,
}

impl Scorer {
    pub fn new(table: Arc<FrequencyTable>, weights: MovementWeights) -> Self {
        Self { weights, table }
    }

    /// Reads and counts every corpus file under `dir` as keystrokes on `layout`.
    pub fn from_corpus_dir<P: AsRef<Path>>(
        dir: P,
        opts: &CorpusOptions,
        layout: &Layout,
        weights: MovementWeights,
    ) -> KeResult<Self> {
        let table = loader::load_corpus_for(dir.as_ref(), opts, layout)?;
        info!(
            "📊 Counted {} distinct n-grams ({} characters)",
            table.len(),
            table.total_monograms()
        );
        Ok(Self::new(Arc::new(table), weights))
    }

    /// Uses a precomputed n-gram TSV instead of a corpus.
    pub fn from_ngrams_file<P: AsRef<Path>>(path: P, weights: MovementWeights) -> KeResult<Self> {
        let table = loader::load_ngrams(path.as_ref())?;
        Ok(Self::new(Arc::new(table), weights))
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Detailed evaluation for reports.
    pub fn evaluate(&self, layout: &Layout) -> EvaluationResult {
        engine::evaluate(layout, &self.table, &self.weights)
    }

    /// Score only, for the search loop.
    pub fn score(&self, layout: &Layout) -> f64 {
        self.evaluate(layout).score
    }
}
