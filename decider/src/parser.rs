//! Shared-text list parser.
//!
//! Turns a blob of newline-separated text into a [`ParsedList`]. Two input
//! shapes are recognised:
//!
//! | Input shape | Items | Title |
//! |-------------|-------|-------|
//! | Plain lines | every non-blank line, trimmed | never |
//! | Checklist (any line like `[ ] ...`) | unchecked checkbox lines only | first line, if it directly precedes a checkbox line |
//!
//! A checkbox line is a trimmed line that starts with `[`, is at least three
//! characters long and has `]` as its third character. The character between
//! the brackets is the marker; `x` or `X` means checked and the line is
//! skipped. Any other marker (usually a space) means unchecked and the text
//! after the `]` is kept.
//!
//! Lengths and positions are counted in `char`s, so multi-byte markers such as
//! `[✓]` are handled like any other marker.
//!
//! # Example Usage
//!
//! ```
//! use decider::parser::parse_list;
//!
//! let list = parse_list("Shopping List\n[x] Milk\n[ ] Bread\n[ ] Eggs");
//! assert_eq!(list.title.as_deref(), Some("Shopping List"));
//! assert_eq!(list.items, vec!["Bread", "Eggs"]);
//! ```

use tracing::debug;

use crate::types::ParsedList;

/// How a single trimmed line was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Not a checkbox line.
    Plain(&'a str),

    /// An unchecked checkbox; holds the text after the `]`, trimmed.
    Unchecked(&'a str),

    /// A checkbox ticked with `x` or `X`.
    Checked,
}

impl LineKind<'_> {
    /// Returns `true` for either checkbox variant.
    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        !matches!(self, LineKind::Plain(_))
    }
}

/// Classifies one line of input.
///
/// The line is trimmed before classification.
///
/// # Examples
///
/// ```
/// use decider::parser::{classify_line, LineKind};
///
/// assert_eq!(classify_line("  [ ] Bread "), LineKind::Unchecked("Bread"));
/// assert_eq!(classify_line("[X] Milk"), LineKind::Checked);
/// assert_eq!(classify_line("Groceries"), LineKind::Plain("Groceries"));
/// ```
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next(), chars.next()) {
        (Some('['), Some(marker), Some(']')) => {
            if matches!(marker, 'x' | 'X') {
                LineKind::Checked
            } else {
                LineKind::Unchecked(chars.as_str().trim())
            }
        }
        _ => LineKind::Plain(trimmed),
    }
}

/// Returns `true` if the trimmed line has the `[<marker>]` prefix.
#[must_use]
pub fn is_checkbox_line(line: &str) -> bool {
    classify_line(line).is_checkbox()
}

/// Parses shared text into a list of candidate items.
///
/// Never fails: empty or whitespace-only input produces an empty list with no
/// title. Callers decide whether the result has enough items via
/// [`ParsedList::validate`].
#[must_use]
pub fn parse_list(text: &str) -> ParsedList {
    let lines: Vec<LineKind<'_>> = candidate_lines(text).map(classify_line).collect();

    if !lines.iter().any(LineKind::is_checkbox) {
        let items: Vec<String> = lines
            .iter()
            .filter_map(|line| match line {
                LineKind::Plain(text) => Some((*text).to_string()),
                _ => None,
            })
            .collect();

        debug!(items = items.len(), "Parsed plain list");

        return ParsedList {
            title: None,
            items,
            checklist: false,
        };
    }

    let title = match lines.as_slice() {
        [LineKind::Plain(heading), next, ..] if next.is_checkbox() => Some((*heading).to_string()),
        _ => None,
    };

    let items: Vec<String> = lines
        .iter()
        .filter_map(|line| match line {
            LineKind::Unchecked(text) if !text.is_empty() => Some((*text).to_string()),
            _ => None,
        })
        .collect();

    debug!(
        items = items.len(),
        checked = lines.iter().filter(|l| matches!(l, LineKind::Checked)).count(),
        has_title = title.is_some(),
        "Parsed checklist"
    );

    ParsedList {
        title,
        items,
        checklist: true,
    }
}

/// Splits on any newline character, trims, and drops blank lines.
fn candidate_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Line terminators: LF, VT, FF, CR, NEL, LINE SEPARATOR, PARAGRAPH SEPARATOR.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
