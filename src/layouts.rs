use crate::error::KeResult;
use crate::geometry::{Finger, Key};
use crate::layout::Layout;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Azerty,
    Qwerty,
    Bepo,
}

/// Static description of a built-in board.
pub struct Board {
    /// The permuted 3x10 block, top row first.
    pub rows: [&'static str; 3],
    /// Shift layer of `rows`, character for character.
    pub shifted: [&'static str; 3],
    /// Digit row and its shift layer, folded onto row 0. Never permuted.
    pub digits: [&'static str; 2],
    /// AltGr characters, keyed by the base character of their key.
    pub altgr: &'static [(char, char)],
    /// Remaining fixed keys: (character, row, column, shifted).
    pub extra: &'static [(char, u8, u8, Option<char>)],
}

impl KnownLayout {
    pub fn board(&self) -> Board {
        match self {
            Self::Azerty => Board {
                rows: ["azertyuiop", "qsdfghjklm", "wxcvbn,;:!"],
                shifted: ["AZERTYUIOP", "QSDFGHJKLM", "WXCVBN?./§"],
                digits: ["&é\"'(-è_çà", "1234567890"],
                altgr: &[
                    ('e', '€'),
                    ('é', '~'),
                    ('"', '#'),
                    ('\'', '{'),
                    ('(', '['),
                    ('-', '|'),
                    ('è', '`'),
                    ('_', '\\'),
                    ('à', '@'),
                ],
                extra: &[
                    ('^', 0, 10, Some('¨')),
                    ('ù', 1, 10, Some('%')),
                    ('⇧', 2, 10, None),
                ],
            },
            Self::Qwerty => Board {
                rows: ["qwertyuiop", "asdfghjkl;", "zxcvbnm,./"],
                shifted: ["QWERTYUIOP", "ASDFGHJKL:", "ZXCVBNM<>?"],
                digits: ["1234567890", "!@#$%^&*()"],
                altgr: &[],
                extra: &[
                    ('-', 0, 10, Some('_')),
                    ('\'', 1, 10, Some('"')),
                    ('⇧', 2, 10, None),
                ],
            },
            // Keys that do not fit the block are appended to the right of their row.
            Self::Bepo => Board {
                rows: ["bépoèvdljz", "auie,ctsrn", "àyx.k'qghf"],
                shifted: ["BÉPOÈVDLJZ", "AUIE;CTSRN", "ÀYX:K?QGHF"],
                digits: ["\"«»()@+-/*", "1234567890"],
                altgr: &[('è', '`')],
                extra: &[
                    ('^', 0, 10, Some('!')),
                    ('w', 0, 11, Some('W')),
                    ('m', 1, 10, Some('M')),
                    ('ç', 1, 11, Some('Ç')),
                    ('ê', 2, 10, Some('Ê')),
                    ('⇧', 2, 11, None),
                ],
            },
        }
    }

    pub fn rows(&self) -> [&'static str; 3] {
        self.board().rows
    }

    pub fn to_layout(&self) -> KeResult<Layout> {
        let board = self.board();
        let altgr = |c: char| board.altgr.iter().find(|(k, _)| *k == c).map(|(_, a)| *a);

        let shifted: BTreeMap<char, char> = board
            .rows
            .iter()
            .zip(board.shifted.iter())
            .flat_map(|(base, shift)| base.chars().zip(shift.chars()))
            .collect();
        let block = Layout::from_rows(self.to_string(), &board.rows)?;
        let mapping = block
            .mapping()
            .iter()
            .map(|(&c, key)| {
                let key = Key {
                    shift_produces: shifted.get(&c).copied(),
                    altgr_produces: altgr(c),
                    ..*key
                };
                (c, key)
            })
            .collect();

        let folded = board.digits[0]
            .chars()
            .zip(board.digits[1].chars())
            .enumerate()
            .map(|(column, (c, shift))| (c, 0, column as u8, Some(shift)));
        let fixed = folded
            .chain(board.extra.iter().copied())
            .map(|(c, row, column, shift)| {
                let key = Key {
                    shift_produces: shift,
                    altgr_produces: altgr(c),
                    ..Key::new(row, column, Finger::for_column(column))
                };
                (c, key)
            })
            .collect();

        Layout::new(self.to_string(), mapping)?.with_fixed_keys(fixed)
    }
}

pub fn get_all_layouts() -> KeResult<Vec<(KnownLayout, Layout)>> {
    KnownLayout::iter()
        .map(|known| Ok((known, known.to_layout()?)))
        .collect()
}
