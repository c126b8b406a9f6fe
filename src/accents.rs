//! Dead-key expansion.
//!
//! Accented letters are typed on most European layouts as a dead key followed
//! by the base letter, and AZERTY digits need shift. Rewriting them before
//! counting makes the n-gram table describe keystrokes rather than glyphs.

const SEQUENCES: &[(char, &str)] = &[
    // Circumflex
    ('â', "^a"),
    ('ê', "^e"),
    ('î', "^i"),
    ('ô', "^o"),
    ('û', "^u"),
    // Acute
    ('é', "´e"),
    ('á', "´a"),
    ('í', "´i"),
    ('ó', "´o"),
    ('ú', "´u"),
    // Grave
    ('à', "`a"),
    ('è', "`e"),
    ('ì', "`i"),
    ('ò', "`o"),
    ('ù', "`u"),
    // Diaeresis
    ('ë', "¨e"),
    ('ï', "¨i"),
    ('ü', "¨u"),
    ('ÿ', "¨y"),
    // Cedilla
    ('ç', "c,"),
    // AZERTY digit row: shift + the unshifted symbol of the key
    ('1', "⇧&"),
    ('2', "⇧é"),
    ('3', "⇧\""),
    ('4', "⇧'"),
    ('5', "⇧("),
    ('6', "⇧-"),
    ('7', "⇧è"),
    ('8', "⇧_"),
    ('9', "⇧ç"),
    ('0', "⇧à"),
];

pub fn sequence_for(c: char) -> Option<&'static str> {
    SEQUENCES.iter().find(|(k, _)| *k == c).map(|(_, s)| *s)
}

pub fn is_expandable(c: char) -> bool {
    sequence_for(c).is_some()
}

/// Replaces every accented character by its keystroke sequence. Single pass.
pub fn expand(text: &str) -> String {
    expand_keeping(text, |_| false)
}

/// Like [`expand`], but leaves alone the characters `typed_directly` accepts:
/// a layout with its own `é` key types it in one keystroke.
pub fn expand_keeping<F>(text: &str, typed_directly: F) -> String
where
    F: Fn(char) -> bool,
{
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match sequence_for(c).filter(|_| !typed_directly(c)) {
            Some(seq) => out.push_str(seq),
            None => out.push(c),
        }
    }
    out
}
