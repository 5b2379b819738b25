//! crates/cna_core/src/codes.rs
//! Question-code helpers: section keys and natural (numeric-aware) ordering.
//! Deterministic, ASCII-agnostic, total over arbitrary strings; no I/O.

use core::cmp::Ordering;

/// Section key of a question code: its first character.
///
/// Codes are opaque; an empty code is still accepted and groups under `'?'`
/// so that grouping stays total.
pub fn section_key(code: &str) -> char {
    code.chars().next().unwrap_or('?')
}

/// Split a code into its leading prefix and trailing digit run, if any.
/// `"A10"` → `("A", Some(10))`; `"A"` → `("A", None)`.
///
/// A digit run too large for `u64` is treated as having no numeric suffix
/// (falls back to lexical comparison).
fn split_trailing_digits(code: &str) -> (&str, Option<u64>) {
    let digits_at = code
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    match digits_at {
        Some(i) => match code[i..].parse::<u64>() {
            Ok(n) => (&code[..i], Some(n)),
            Err(_) => (code, None),
        },
        None => (code, None),
    }
}

/// Natural comparison of question codes: compare the alphabetic prefix
/// lexically, then the trailing digit run numerically, so `"A2" < "A10"`.
/// Codes without a digit suffix compare purely lexically. Ties on
/// (prefix, number) fall back to full lexical comparison ("A07" vs "A7")
/// to keep the ordering total and stable.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (pa, na) = split_trailing_digits(a);
    let (pb, nb) = split_trailing_digits(b);
    match (na, nb) {
        (Some(x), Some(y)) => pa
            .cmp(pb)
            .then(x.cmp(&y))
            .then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}
