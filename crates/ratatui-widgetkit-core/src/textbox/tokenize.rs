use crate::canvas::cell_width;

/// Rewrites `text` into the single-space-separated form the word wrapper consumes.
///
/// Carriage returns and tabs become spaces, `.`, `,` and `;` get a trailing space so punctuation
/// never fuses with the next word, and doubled spaces are collapsed in one non-overlapping pass
/// (a run of four spaces becomes two).
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '\r' | '\t' => out.push(' '),
            '.' | ',' | ';' => {
                out.push(ch);
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }
    out.replace("  ", " ")
}

/// Splits normalized text into words on single spaces.
///
/// Empty words are kept: they come from leading, trailing or leftover doubled spaces and the wrapper
/// turns each of them into one space.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text).split(' ').map(str::to_string).collect()
}

pub fn is_line_break(word: &str) -> bool {
    word == "\n"
}

/// Terminal columns `word` occupies on its current line. Wide glyphs take two, embedded newlines
/// take none.
pub fn visible_len(word: &str) -> usize {
    word.chars()
        .filter(|&c| c != '\n')
        .map(|c| cell_width(c) as usize)
        .sum()
}
