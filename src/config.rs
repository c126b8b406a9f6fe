use crate::error::{KeResult, KeyEvoError};
use crate::geometry::Finger;
use crate::scorer::types::{Movement, PerFinger};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ideal share of keystrokes per finger, left pinky to right pinky (percent).
pub const IDEAL_FINGER_LOAD: [f64; Finger::COUNT] = [5.0, 12.0, 15.0, 18.0, 18.0, 15.0, 12.0, 5.0];

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub optimizer: OptimizerParams,
    #[command(flatten)]
    pub weights: MovementWeights,
    #[command(flatten)]
    pub corpus: CorpusOptions,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
    #[arg(long, default_value_t = 50)]
    pub population_size: usize,
    #[arg(long, default_value_t = 100)]
    pub max_generations: usize,
    #[arg(long, default_value_t = 0.2)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = 0.9)]
    pub crossover_rate: f64,
    #[arg(long, default_value_t = 3)]
    pub tournament_size: usize,
    /// Generations without a new best before the search stops.
    #[arg(long, default_value_t = 20)]
    pub stagnation_limit: usize,
    /// Fixes the random stream; unseeded runs differ from one another.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.2,
            crossover_rate: 0.9,
            tournament_size: 3,
            stagnation_limit: 20,
            seed: None,
        }
    }
}

impl OptimizerParams {
    pub fn validate(&self) -> KeResult<()> {
        if self.population_size == 0 {
            return Err(KeyEvoError::InvalidParameter(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(KeyEvoError::InvalidParameter(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(KeyEvoError::InvalidParameter(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.stagnation_limit == 0 {
            return Err(KeyEvoError::InvalidParameter(
                "stagnation_limit must be at least 1".into(),
            ));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(KeyEvoError::InvalidParameter(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementWeights {
    // === Penalties ===
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    pub same_finger: f64,
    #[arg(long, default_value_t = 1.5, allow_hyphen_values = true)]
    pub lateral_stretch: f64,
    #[arg(long, default_value_t = 1.8, allow_hyphen_values = true)]
    pub scissors: f64,
    #[arg(long, default_value_t = 1.7, allow_hyphen_values = true)]
    pub bad_redirection: f64,
    #[arg(long, default_value_t = 1.2, allow_hyphen_values = true)]
    pub redirection: f64,
    #[arg(long, default_value_t = 1.6, allow_hyphen_values = true)]
    pub same_finger_skipgram: f64,

    // === Bonuses (negative) ===
    #[arg(long, default_value_t = -0.8, allow_hyphen_values = true)]
    pub hand_alternation: f64,
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub inward_roll: f64,
    #[arg(long, default_value_t = -0.5, allow_hyphen_values = true)]
    pub outward_roll: f64,

    // === Finger balance ===
    /// Multiplier of the finger-load deviation term. 0 leaves it out of the score.
    #[arg(long, default_value_t = 0.0)]
    pub finger_load_weight: f64,
    #[arg(skip = IDEAL_FINGER_LOAD)]
    pub ideal_finger_load: [f64; Finger::COUNT],
}

impl Default for MovementWeights {
    fn default() -> Self {
        Self {
            same_finger: 2.0,
            lateral_stretch: 1.5,
            scissors: 1.8,
            bad_redirection: 1.7,
            redirection: 1.2,
            same_finger_skipgram: 1.6,
            hand_alternation: -0.8,
            inward_roll: -1.0,
            outward_roll: -0.5,
            finger_load_weight: 0.0,
            ideal_finger_load: IDEAL_FINGER_LOAD,
        }
    }
}

impl MovementWeights {
    #[inline(always)]
    pub fn weight(&self, m: Movement) -> f64 {
        match m {
            Movement::SameFinger => self.same_finger,
            Movement::LateralStretch => self.lateral_stretch,
            Movement::Scissors => self.scissors,
            Movement::HandAlternation => self.hand_alternation,
            Movement::InwardRoll => self.inward_roll,
            Movement::OutwardRoll => self.outward_roll,
            Movement::Redirection => self.redirection,
            Movement::BadRedirection => self.bad_redirection,
            Movement::SameFingerSkipgram => self.same_finger_skipgram,
        }
    }

    pub fn ideal_load(&self) -> PerFinger<f64> {
        PerFinger(self.ideal_finger_load)
    }

    pub fn validate(&self) -> KeResult<()> {
        let all_finite = Movement::ALL.iter().all(|&m| self.weight(m).is_finite())
            && self.finger_load_weight.is_finite()
            && self.ideal_finger_load.iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(KeyEvoError::Validation(
                "movement weights must be finite numbers".into(),
            ));
        }
        Ok(())
    }

    /// Loads weights from JSON. Missing fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let content = fs::read_to_string(path)?;
        let weights: MovementWeights = serde_json::from_str(&content)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Copies every weight the user typed on the command line over the
    /// values loaded from file.
    pub fn merge_from_cli(&mut self, cli_weights: &MovementWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(same_finger, "same_finger");
        update_if_present!(lateral_stretch, "lateral_stretch");
        update_if_present!(scissors, "scissors");
        update_if_present!(bad_redirection, "bad_redirection");
        update_if_present!(redirection, "redirection");
        update_if_present!(same_finger_skipgram, "same_finger_skipgram");

        update_if_present!(hand_alternation, "hand_alternation");
        update_if_present!(inward_roll, "inward_roll");
        update_if_present!(outward_roll, "outward_roll");

        update_if_present!(finger_load_weight, "finger_load_weight");
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusOptions {
    /// Skip rewriting accented characters into dead-key sequences.
    #[arg(long = "no-accents", action = ArgAction::SetFalse)]
    pub expand_accents: bool,
    /// Fold text to lowercase before counting.
    #[arg(long, default_value_t = false)]
    pub lowercase: bool,
    #[arg(long, default_value = "txt")]
    pub extension: String,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            expand_accents: true,
            lowercase: false,
            extension: "txt".to_string(),
        }
    }
}
