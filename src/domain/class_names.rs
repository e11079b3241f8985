//! Helpers for turning free-form text into CSS class tokens.
//!
//! The sanitizer folds accented characters to their ASCII base
//! (`unicode-normalization` decomposes, combining marks are dropped), keeps
//! only `[a-z0-9]` plus separators, and joins separator runs with a single
//! hyphen. Inputs like “Café Döcs!!” become `cafe-docs`.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Sanitize a class list fragment.
///
/// Separators (ASCII whitespace, `.`, `_`, `-`) are collapsed, so a
/// multi-class string such as `"a b"` becomes the single token `a-b`. A
/// separator at either end survives as a hyphen; callers trim with
/// [`trim_class_list`] before writing the attribute.
pub fn sanitize_class_list(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect();

    let mut output = String::with_capacity(folded.len());
    let mut pending_separator = false;

    for ch in folded.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator {
                output.push('-');
                pending_separator = false;
            }
            output.push(ch);
        } else if is_separator(ch) {
            pending_separator = true;
        }
    }

    if pending_separator {
        output.push('-');
    }

    output
}

/// Strip leading hyphens and whitespace from an assembled class list.
pub fn trim_class_list(classes: &str) -> &str {
    classes.trim_start_matches(|ch: char| ch == '-' || ch.is_whitespace())
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' | '.' | '_' | '-')
}
