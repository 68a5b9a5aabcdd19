//! String tests and slices with the semantics the feature names promise.
//!
//! All slicing is by `char`, never by byte, so multi-byte words are safe.
//! Case and digit tests follow Unicode character properties, the way
//! `str.isupper`, `str.istitle` and `str.isdigit` define them.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Characters with `Numeric_Type=Digit` that are not decimal digits
/// (superscripts, circled and parenthesized digits, ...).
const DIGIT_RANGES: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1F100}', '\u{1F10A}'),
];

/// Last `n` characters of `word`, or the whole word when it is shorter.
pub fn suffix(word: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match word.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

/// First `n` characters of `word`, or the whole word when it is shorter.
pub fn prefix(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

fn is_titlecase(c: char) -> bool {
    c.general_category() == GeneralCategory::TitlecaseLetter
}

fn is_digit_char(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
        || DIGIT_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// At least one uppercase character and no lowercase or titlecase ones.
pub fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Uppercase and titlecase characters only start a cased run, lowercase ones
/// only continue it, and at least one cased character exists.
pub fn is_title(word: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in word.chars() {
        if c.is_uppercase() || is_titlecase(c) {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

/// Non-empty and made only of digits: any script's decimal digits plus
/// superscript and circled forms.
pub fn is_digit(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_digit_char)
}
