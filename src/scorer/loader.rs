use crate::config::CorpusOptions;
use crate::corpus::{FrequencyTable, NgramCounter};
use crate::error::{KeResult, KeyEvoError};
use crate::layout::Layout;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Reads every regular file under `dir` (recursively) whose extension is
/// `extension`, in path order.
///
/// A missing root is fatal. Unreadable or non-UTF-8 files are logged and
/// skipped, as are empty ones.
pub fn read_corpus_dir(dir: &Path, extension: &str) -> KeResult<Vec<String>> {
    if !dir.is_dir() {
        return Err(KeyEvoError::CorpusNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut texts = Vec::new();
    let walker = WalkDir::new(dir).follow_links(false).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("⚠️  Skipping unreadable corpus entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        match fs::read_to_string(path) {
            Ok(text) if text.is_empty() => debug!("   Skipping empty file {}", path.display()),
            Ok(text) => {
                debug!("   Read {} ({} bytes)", path.display(), text.len());
                texts.push(text);
            }
            Err(e) => warn!("⚠️  Skipping {}: {}", path.display(), e),
        }
    }

    Ok(texts)
}

pub fn load_corpus_dir(dir: &Path, opts: &CorpusOptions) -> KeResult<FrequencyTable> {
    count_corpus_dir(dir, opts, &NgramCounter::from_options(opts))
}

/// Counts the corpus as keystrokes on `layout`: accented characters with a
/// key of their own are not expanded.
pub fn load_corpus_for(dir: &Path, opts: &CorpusOptions, layout: &Layout) -> KeResult<FrequencyTable> {
    count_corpus_dir(dir, opts, &NgramCounter::from_options(opts).for_layout(layout))
}

fn count_corpus_dir(dir: &Path, opts: &CorpusOptions, counter: &NgramCounter) -> KeResult<FrequencyTable> {
    let texts = read_corpus_dir(dir, &opts.extension)?;
    if texts.is_empty() {
        warn!("⚠️  No .{} files found under {}", opts.extension, dir.display());
    }
    Ok(counter.count_all(&texts))
}

/// Loads an `ngram<TAB>count` file. Lines with an unparsable count or an
/// n-gram outside 1..=3 characters are skipped.
pub fn load_ngrams(path: &Path) -> KeResult<FrequencyTable> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(file);

    let mut pairs = Vec::new();
    let mut skipped = 0usize;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("   [Row {}] TSV parse error: {}", row_idx + 1, e);
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        // The n-gram is not trimmed: a space is a valid character.
        let ngram = &rec[0];
        let len = ngram.chars().count();
        if !(1..=3).contains(&len) {
            skipped += 1;
            continue;
        }
        match rec[1].trim().parse::<u64>() {
            Ok(count) => pairs.push((ngram.to_string(), count)),
            Err(_) => {
                debug!("   [Row {}] invalid count '{}'", row_idx + 1, &rec[1]);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("   Skipped {} invalid rows in {}", skipped, path.display());
    }

    Ok(FrequencyTable::from_pairs(pairs))
}

/// Writes the table as `ngram<TAB>count`, one entry per line. N-grams holding
/// a tab or line break cannot be represented and are left out.
pub fn write_ngrams<W: Write>(table: &FrequencyTable, writer: W) -> KeResult<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    for (ngram, count) in table.iter() {
        if ngram.contains(|c: char| matches!(c, '\t' | '\n' | '\r')) {
            continue;
        }
        wtr.write_record([ngram.as_str(), count.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_ngrams(table: &FrequencyTable, path: &Path) -> KeResult<()> {
    let file = File::create(path)?;
    write_ngrams(table, file)
}
