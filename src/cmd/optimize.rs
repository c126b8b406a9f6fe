use crate::reports;
use clap::Args;
use keyevo::config::Config;
use keyevo::error::KeResult;
use keyevo::layout::Layout;
use keyevo::optimizer::{GeneticOptimizer, ProgressCallback};
use keyevo::scorer::Scorer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Save the optimized layout as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

struct CliLogger;

impl ProgressCallback for CliLogger {
    fn on_progress(&self, generation: usize, best: f64, generation_best: f64, _: &Layout) -> bool {
        if generation % 10 == 0 {
            info!(
                "Gen {:4} | Global Best: {:.1} | Generation Best: {:.1}",
                generation, best, generation_best
            );
        }
        true
    }
}

pub fn run(args: OptimizeArgs, scorer: Scorer, initial: &Layout) -> KeResult<()> {
    let scorer = Arc::new(scorer);
    let params = args.config.optimizer.clone();

    let before = scorer.evaluate(initial);
    reports::print_layout_grid(initial);
    reports::print_evaluation_report(
        &format!("INITIAL: {}", initial.name()),
        &before,
        &scorer.weights,
    );

    let optimizer = GeneticOptimizer::new(scorer.clone(), params)?;
    let params = optimizer.params();
    info!(
        "🧬 Evolving {} candidates for up to {} generations",
        params.population_size, params.max_generations
    );
    if params.seed.is_none() {
        info!("🎲 No --seed given, results will vary between runs");
    }

    let start = Instant::now();
    let result = optimizer.run(initial, CliLogger);
    info!(
        "🏁 Stopped after {} generations ({}) in {:.1}s",
        result.generations,
        result.stop_reason,
        start.elapsed().as_secs_f32()
    );

    let optimized = result
        .layout
        .with_name(format!("{}-optimized", initial.name()));
    let after = scorer.evaluate(&optimized);

    reports::print_layout_grid(&optimized);
    reports::print_evaluation_report("OPTIMIZED", &after, &scorer.weights);
    reports::print_finger_load_report(&after, &scorer.weights);
    reports::print_comparison_report(&before, &after);
    reports::print_swap_report(&optimized.swaps_from(initial));

    if let Some(path) = &args.output {
        let description = format!(
            "Optimized from {} (score {:.1} -> {:.1})",
            initial.name(),
            before.score,
            after.score
        );
        optimized.save(path, &description)?;
        info!("💾 Saved optimized layout to {}", path.display());
    }

    Ok(())
}
