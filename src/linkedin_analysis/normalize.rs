// src/linkedin_analysis/normalize.rs
//! Whitespace and dash clean-up applied before any strategy runs.

/// En dash, em dash, figure dash and minus sign all read as `-`.
const DASHES: [char; 4] = ['\u{2013}', '\u{2014}', '\u{2012}', '\u{2212}'];

/// Profile text in the two shapes the strategies consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileText {
    /// Whole text on one line, single-spaced.
    pub flat: String,
    /// Non-empty lines, each single-spaced.
    pub lines: Vec<String>,
}

impl ProfileText {
    pub fn new(raw: &str) -> Self {
        Self {
            flat: normalize_flat(raw),
            lines: normalize_lines(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

pub fn normalize_flat(text: &str) -> String {
    text.split_whitespace()
        .map(replace_dashes)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits on `\n`, `\r\n` and bare `\r`, dropping lines left empty.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split(['\r', '\n'])
        .map(normalize_flat)
        .filter(|line| !line.is_empty())
        .collect()
}

fn replace_dashes(word: &str) -> String {
    word.chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect()
}
