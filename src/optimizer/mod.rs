pub mod crossover;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::runner::{
    GeneticOptimizer, NoProgress, OptimizationResult, ProgressCallback, StopReason,
};
use crate::layout::Layout;

/// A member of the population. The score is cached so parents copied into the
/// next generation are not evaluated twice.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub layout: Layout,
    pub score: Option<f64>,
}

impl Candidate {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            score: None,
        }
    }
}
