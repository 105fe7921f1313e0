//! Text canonicalization for index keys and queries.
//!
//! Every string that enters the location index — canonical names, aliases,
//! and user queries — passes through [`normalize`] first, so matching is
//! insensitive to case, diacritics, punctuation, and spacing.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Typographic apostrophe variants folded into the ASCII apostrophe before
/// the punctuation pass.
const APOSTROPHE_VARIANTS: [char; 3] = ['\u{2018}', '\u{2019}', '\u{02BC}'];

/// Canonicalize a piece of location text.
///
/// Lowercases, applies compatibility decomposition and drops combining
/// marks, folds apostrophe variants, replaces every character outside
/// `[a-z0-9]` and whitespace with a single space, then collapses runs of
/// whitespace and trims. The result contains only lowercase ASCII letters,
/// digits, and single interior spaces.
///
/// Pure and idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```rust
/// use kaifong::normalize;
///
/// assert_eq!(normalize("Tsim Sha Tsui!"), "tsim sha tsui");
/// assert_eq!(normalize("  Sai   Ying\tPun "), "sai ying pun");
/// assert_eq!(normalize("Mé Fòo"), "me foo");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut normalized = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for ch in lowered.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        let ch = if APOSTROPHE_VARIANTS.contains(&ch) {
            '\''
        } else {
            ch
        };
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(ch);
        } else {
            // Whitespace and everything else becomes a (collapsed) space.
            pending_space = true;
        }
    }

    normalized
}
