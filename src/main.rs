use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyevo::config::{CorpusOptions, MovementWeights};
use keyevo::error::{KeResult, KeyEvoError};
use keyevo::layout::Layout;
use keyevo::layouts::KnownLayout;
use keyevo::scorer::Scorer;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the .txt corpus files
    #[arg(global = true, short, long)]
    corpus: Option<PathBuf>,

    /// Precomputed n-gram TSV, used instead of --corpus
    #[arg(global = true, short, long, conflicts_with = "corpus")]
    ngrams: Option<PathBuf>,

    /// Layout JSON file or built-in layout name
    #[arg(global = true, short, long, default_value = "azerty")]
    layout: String,

    #[arg(global = true, long)]
    weights: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a better layout starting from --layout
    Optimize(cmd::optimize::OptimizeArgs),
    /// Score --layout without optimizing it
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Count the corpus and export the n-gram table
    Ngrams(cmd::ngrams::NgramsArgs),
}

fn main() {
    // 1. Parse Raw Matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("🚀 Initializing KeyEvo...");

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> KeResult<()> {
    match cli.command {
        Commands::Optimize(args) => {
            let weights = resolve_weights(
                cli.weights.as_deref(),
                &args.config.weights,
                matches.subcommand_matches("optimize"),
            )?;
            let layout = load_layout(&cli.layout)?;
            let scorer = load_scorer(
                cli.corpus.as_deref(),
                cli.ngrams.as_deref(),
                &args.config.corpus,
                &layout,
                weights,
            )?;
            cmd::optimize::run(args, scorer, &layout)
        }
        Commands::Evaluate(args) => {
            let weights = resolve_weights(
                cli.weights.as_deref(),
                &args.weights,
                matches.subcommand_matches("evaluate"),
            )?;
            let layout = load_layout(&cli.layout)?;
            let scorer = load_scorer(
                cli.corpus.as_deref(),
                cli.ngrams.as_deref(),
                &args.corpus,
                &layout,
                weights,
            )?;
            cmd::evaluate::run(&scorer, &layout);
            Ok(())
        }
        Commands::Ngrams(args) => {
            let layout = load_layout(&cli.layout)?;
            let scorer = load_scorer(
                cli.corpus.as_deref(),
                cli.ngrams.as_deref(),
                &args.corpus,
                &layout,
                MovementWeights::default(),
            )?;
            cmd::ngrams::run(&args, scorer.table())
        }
    }
}

/// JSON weights file first, then any weight typed on the command line.
fn resolve_weights(
    path: Option<&Path>,
    cli_weights: &MovementWeights,
    sub_matches: Option<&ArgMatches>,
) -> KeResult<MovementWeights> {
    let Some(path) = path else {
        cli_weights.validate()?;
        return Ok(cli_weights.clone());
    };

    info!("⚖️  Loading Weights from: {}", path.display());
    let mut weights = MovementWeights::load_from_file(path)?;
    match sub_matches {
        Some(m) => weights.merge_from_cli(cli_weights, m),
        None => warn!("⚠️  Command line weights ignored."),
    }
    weights.validate()?;
    Ok(weights)
}

/// Clap rejects `--corpus` together with `--ngrams`, so at most one is set.
fn load_scorer(
    corpus: Option<&Path>,
    ngrams: Option<&Path>,
    opts: &CorpusOptions,
    layout: &Layout,
    weights: MovementWeights,
) -> KeResult<Scorer> {
    if let Some(path) = ngrams {
        info!("📂 Loading N-grams: {}", path.display());
        return Scorer::from_ngrams_file(path, weights);
    }
    match corpus {
        Some(dir) => {
            info!("📚 Reading Corpus: {}", dir.display());
            Scorer::from_corpus_dir(dir, opts, layout, weights)
        }
        None => Err(KeyEvoError::InvalidParameter(
            "either --corpus or --ngrams is required".into(),
        )),
    }
}

/// A path to a layout document, or the name of a built-in layout.
fn load_layout(name: &str) -> KeResult<Layout> {
    let path = Path::new(name);
    if path.is_file() {
        info!("⌨️  Loading Layout: {}", path.display());
        return Layout::load_from_file(path);
    }
    match KnownLayout::from_str(name) {
        Ok(known) => {
            info!("⌨️  Using built-in layout: {}", known);
            known.to_layout()
        }
        Err(_) => {
            let names: Vec<String> = KnownLayout::iter().map(|k| k.to_string()).collect();
            Err(KeyEvoError::ConfigParse(format!(
                "'{}' is neither a layout file nor a built-in layout ({})",
                name,
                names.join(", ")
            )))
        }
    }
}
