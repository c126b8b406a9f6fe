use crate::reports;
use clap::Args;
use keyevo::config::{CorpusOptions, MovementWeights};
use keyevo::layout::Layout;
use keyevo::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub weights: MovementWeights,
    #[command(flatten)]
    pub corpus: CorpusOptions,
}

pub fn run(scorer: &Scorer, layout: &Layout) {
    reports::print_layout_grid(layout);
    let details = scorer.evaluate(layout);
    reports::print_evaluation_report(layout.name(), &details, &scorer.weights);
    reports::print_finger_load_report(&details, &scorer.weights);
}
