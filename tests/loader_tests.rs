use keyevo::config::CorpusOptions;
use keyevo::corpus::FrequencyTable;
use keyevo::scorer::loader::{load_corpus_dir, load_ngrams, read_corpus_dir, save_ngrams, write_ngrams};
use keyevo::KeyEvoError;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

fn corpus_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("a.txt"), "abc").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("b.txt"), "cab").unwrap();
    fs::write(dir.path().join("notes.md"), "zzz").unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    dir
}

#[test]
fn test_reads_txt_files_recursively() {
    let dir = corpus_dir();
    let texts = read_corpus_dir(dir.path(), "txt").unwrap();
    assert_eq!(texts, vec!["abc".to_string(), "cab".to_string()]);

    let md = read_corpus_dir(dir.path(), "md").unwrap();
    assert_eq!(md, vec!["zzz".to_string()]);
}

#[test]
fn test_non_utf8_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "ok").unwrap();
    fs::write(dir.path().join("b.txt"), [0xff, 0xfe, b'x']).unwrap();

    let texts = read_corpus_dir(dir.path(), "txt").unwrap();
    assert_eq!(texts, vec!["ok".to_string()]);

    let table = load_corpus_dir(dir.path(), &CorpusOptions::default()).unwrap();
    assert_eq!(table.total_monograms(), 2);
    assert_eq!(table.get("x"), 0);
}

#[test]
fn test_windows_do_not_cross_files() {
    let dir = corpus_dir();
    let opts = CorpusOptions::default();
    let table = load_corpus_dir(dir.path(), &opts).unwrap();

    assert_eq!(table.get("c"), 2);
    assert_eq!(table.get("ab"), 2);
    assert_eq!(table.get("ca"), 1);
    // "abc" followed by "cab" would give "cc" if files were concatenated.
    assert_eq!(table.get("cc"), 0);
    assert_eq!(table.get("z"), 0);
    assert_eq!(table.total_trigrams(), 2);
}

#[test]
fn test_missing_corpus_dir() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        read_corpus_dir(&missing, "txt"),
        Err(KeyEvoError::CorpusNotFound { .. })
    ));

    // A file is not a corpus directory either.
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();
    assert!(matches!(
        load_corpus_dir(&file, &CorpusOptions::default()),
        Err(KeyEvoError::CorpusNotFound { .. })
    ));
}

#[test]
fn test_empty_corpus_gives_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_corpus_dir(dir.path(), &CorpusOptions::default()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_load_ngrams_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ngrams.tsv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "e\t120").unwrap();
    writeln!(file, " \t80").unwrap(); // space is a character
    writeln!(file, "th\t 40 ").unwrap(); // count is trimmed
    writeln!(file, "the\t30").unwrap();
    writeln!(file, "\"a\t5").unwrap(); // quotes are literal
    writeln!(file, "toolong\t9").unwrap();
    writeln!(file, "x\tmany").unwrap();
    writeln!(file, "lonely").unwrap();
    writeln!(file, "e\t5").unwrap(); // repeated entries add up
    drop(file);

    let table = load_ngrams(&path).unwrap();
    assert_eq!(table.get("e"), 125);
    assert_eq!(table.get(" "), 80);
    assert_eq!(table.get("th"), 40);
    assert_eq!(table.get("the"), 30);
    assert_eq!(table.get("\"a"), 5);
    assert_eq!(table.get("x"), 0);
    assert_eq!(table.len(), 5);
}

#[test]
fn test_missing_ngrams_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_ngrams(&dir.path().join("none.tsv")),
        Err(KeyEvoError::Io(_))
    ));
}

#[test]
fn test_write_ngrams_format() {
    let table = FrequencyTable::from_pairs([("b", 1u64), ("a", 3), ("a b", 2), ("a\tb", 7)]);
    let mut buf = Vec::new();
    write_ngrams(&table, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    // Sorted by count within each length; tabs cannot be written.
    assert_eq!(text, "a\t3\nb\t1\na b\t2\n");
}

#[test]
fn test_saved_table_loads_back() {
    let table = FrequencyTable::from_pairs([("e", 10u64), (" ", 4), ("e ", 3), (" e", 2), ("e e", 1)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tsv");

    save_ngrams(&table, &path).unwrap();
    assert_eq!(load_ngrams(&path).unwrap(), table);
}
