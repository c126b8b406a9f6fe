use super::crossover::single_point_crossover;
use super::mutation::swap_mutation;
use super::selection::tournament_select;
use super::Candidate;
use crate::config::OptimizerParams;
use crate::error::KeResult;
use crate::layout::Layout;
use crate::scorer::Scorer;
use fastrand::Rng;
use rayon::prelude::*;
use std::sync::Arc;
use strum_macros::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    MaxGenerations,
    Stagnation,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub layout: Layout,
    pub score: f64,
    pub generations: usize,
    /// Best score seen so far, recorded after each generation.
    pub history: Vec<f64>,
    pub stop_reason: StopReason,
}

/// Receives updates after each generation.
/// Returning `false` stops the search; the best layout found so far is kept.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(
        &self,
        generation: usize,
        best_score: f64,
        generation_best: f64,
        best_layout: &Layout,
    ) -> bool;
}

/// Callback that never interrupts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: f64, _: f64, _: &Layout) -> bool {
        true
    }
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, f64, f64, &Layout) -> bool + Send + Sync,
{
    fn on_progress(
        &self,
        generation: usize,
        best_score: f64,
        generation_best: f64,
        best_layout: &Layout,
    ) -> bool {
        self(generation, best_score, generation_best, best_layout)
    }
}

pub struct GeneticOptimizer {
    scorer: Arc<Scorer>,
    params: OptimizerParams,
}

impl GeneticOptimizer {
    pub fn new(scorer: Arc<Scorer>, params: OptimizerParams) -> KeResult<Self> {
        params.validate()?;
        Ok(Self { scorer, params })
    }

    pub fn params(&self) -> &OptimizerParams {
        &self.params
    }

    pub fn run<CB: ProgressCallback>(&self, initial: &Layout, callback: CB) -> OptimizationResult {
        let opts = &self.params;
        let mut rng = match opts.seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        let order: Vec<char> = initial.chars().collect();

        // 1. Initial population: the starting layout plus mutants of it
        let mut population: Vec<Candidate> = Vec::with_capacity(opts.population_size);
        population.push(Candidate::new(initial.clone()));
        while population.len() < opts.population_size {
            population.push(Candidate::new(swap_mutation(initial, &mut rng)));
        }

        // 2. Global State
        let mut best_layout = initial.clone();
        let mut best_score = f64::INFINITY;
        let mut history = Vec::new();
        let mut stagnant = 0;
        let mut generations = 0;
        let mut stop_reason = StopReason::MaxGenerations;

        // 3. Main Loop
        for generation in 0..opts.max_generations {
            generations = generation + 1;

            // A. Score new candidates in parallel
            population
                .par_iter_mut()
                .filter(|c| c.score.is_none())
                .for_each(|c| c.score = Some(self.scorer.score(&c.layout)));

            let scores: Vec<f64> = population
                .iter()
                .map(|c| c.score.unwrap_or(f64::INFINITY))
                .collect();

            // B. Generation best, first one wins ties
            let mut gen_idx = 0;
            for (i, &s) in scores.iter().enumerate() {
                if s < scores[gen_idx] {
                    gen_idx = i;
                }
            }
            let gen_best = scores[gen_idx];

            if gen_best < best_score {
                best_score = gen_best;
                best_layout = population[gen_idx].layout.clone();
                stagnant = 0;
            } else {
                stagnant += 1;
            }
            history.push(best_score);

            debug!(
                "Generation {:>4}: best {:.2} (generation {:.2}, stagnant {})",
                generation, best_score, gen_best, stagnant
            );

            if !callback.on_progress(generation, best_score, gen_best, &best_layout) {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if stagnant >= opts.stagnation_limit {
                stop_reason = StopReason::Stagnation;
                break;
            }
            if generations == opts.max_generations {
                break;
            }

            // C. Breed the next generation
            let mut next: Vec<Candidate> = Vec::with_capacity(opts.population_size);
            while next.len() < opts.population_size {
                let i = tournament_select(&scores, opts.tournament_size, &mut rng);
                let j = tournament_select(&scores, opts.tournament_size, &mut rng);

                let children = if rng.f64() < opts.crossover_rate {
                    let (a, b) = single_point_crossover(
                        &population[i].layout,
                        &population[j].layout,
                        &order,
                        &mut rng,
                    );
                    [Candidate::new(a), Candidate::new(b)]
                } else {
                    [population[i].clone(), population[j].clone()]
                };

                for child in children {
                    if next.len() >= opts.population_size {
                        break;
                    }
                    // D. Mutation
                    let child = if rng.f64() < opts.mutation_rate {
                        Candidate::new(swap_mutation(&child.layout, &mut rng))
                    } else {
                        child
                    };
                    next.push(child);
                }
            }
            population = next;
        }

        OptimizationResult {
            layout: best_layout,
            score: best_score,
            generations,
            history,
            stop_reason,
        }
    }
}
