use crate::reports;
use clap::Args;
use keyevo::config::CorpusOptions;
use keyevo::corpus::FrequencyTable;
use keyevo::error::KeResult;
use keyevo::scorer::loader;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct NgramsArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,

    /// Write the TSV here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Rows of the summary printed when writing to a file
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

pub fn run(args: &NgramsArgs, table: &FrequencyTable) -> KeResult<()> {
    match &args.out {
        Some(path) => {
            loader::save_ngrams(table, path)?;
            info!("💾 Wrote {} n-grams to {}", table.len(), path.display());
            reports::print_top_ngrams(table, args.top);
        }
        None => loader::write_ngrams(table, io::stdout().lock())?,
    }
    Ok(())
}
