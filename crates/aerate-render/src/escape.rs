//! reStructuredText inline markup recognition rules.
//!
//! A start marker is only recognized after whitespace or certain punctuation,
//! and an end marker only before whitespace or certain punctuation. When the
//! neighboring character would break recognition, an escaped separator is
//! emitted between marker and neighbor.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Escape emitted before a start marker.
pub(crate) const START_ESCAPE: &str = "\\ ";

/// Escape emitted after an end marker followed by text.
pub(crate) const END_ESCAPE: &str = "\\";

/// Escape emitted after an end marker followed directly by another decoration.
///
/// The escaped space renders as nothing and keeps the next start marker
/// recognizable.
pub(crate) const END_ESCAPE_BEFORE_MARKUP: &str = "\\ ";

/// Whether a start marker preceded by `previous` needs [`START_ESCAPE`].
///
/// `None` is the start of a text block.
pub(crate) fn needs_start_escape(previous: Option<char>) -> bool {
    let Some(c) = previous else {
        return false;
    };
    if c.is_whitespace() {
        return false;
    }
    if matches!(c, '\'' | '"' | '<' | '(' | '[' | '{') {
        return true;
    }
    if matches!(
        c.general_category(),
        GeneralCategory::OpenPunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
    ) {
        return true;
    }
    if matches!(c, '-' | ':' | '/') {
        return false;
    }
    !matches!(
        c.general_category(),
        GeneralCategory::DashPunctuation | GeneralCategory::OtherPunctuation
    )
}

/// Whether an end marker followed by `next` needs an end escape.
///
/// `None` is the end of a text block.
pub(crate) fn needs_end_escape(next: Option<char>) -> bool {
    let Some(c) = next else {
        return false;
    };
    if c.is_whitespace() {
        return false;
    }
    if matches!(
        c,
        '-' | '.' | ',' | ':' | ';' | '!' | '?' | '\\' | '/' | '\'' | '"' | ')' | ']' | '}' | '>'
    ) {
        return false;
    }
    !matches!(
        c.general_category(),
        GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Escape plain text for reStructuredText and collapse whitespace runs.
///
/// Backslashes, `*`, `` ` `` and `|` are always escaped; `_` only at the end
/// of a word, where it would read as a reference.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                while chars.next_if(|next| next.is_whitespace()).is_some() {}
                out.push(' ');
            }
            '\\' | '*' | '`' | '|' => {
                out.push('\\');
                out.push(c);
            }
            '_' if chars.peek().is_none_or(|next| next.is_whitespace()) => {
                out.push_str("\\_");
            }
            _ => out.push(c),
        }
    }
    out
}

/// Collapse whitespace runs without escaping anything.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
