//! Text styling hook and word wrapping.
//!
//! Game logic never emits escape codes itself. Formatting code tags spans of
//! text with a [`Style`] and hands them to a [`Stylist`], which is free to
//! ignore the tag. Styling never affects game state.

/// Semantic tag for a span of output text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// A room's title line.
    RoomName,
    /// Exit directions.
    Exit,
    /// Item names.
    Item,
    /// Friendly or neutral NPC names.
    Npc,
    /// Hostile NPC names.
    Hostile,
    /// Damage dealt or taken.
    Damage,
    /// Healing and recovery.
    Heal,
    /// Positive outcomes (level ups, victories).
    Success,
    /// Failures and warnings.
    Error,
    /// Secondary information.
    Dim,
    /// Section headings.
    Heading,
}

/// The colorize hook: `colorize(text, style) -> text`.
pub trait Stylist {
    /// Returns `text` decorated for `style`.
    fn colorize(&self, text: &str, style: Style) -> String;
}

/// Leaves text untouched. Used by tests and non-terminal front ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainStylist;

impl Stylist for PlainStylist {
    fn colorize(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// ANSI terminal colors.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiStylist;

impl AnsiStylist {
    const fn code(style: Style) -> &'static str {
        match style {
            Style::RoomName => "1;36",
            Style::Exit => "32",
            Style::Item => "33",
            Style::Npc => "35",
            Style::Hostile => "1;31",
            Style::Damage => "31",
            Style::Heal => "1;32",
            Style::Success => "1;33",
            Style::Error => "31",
            Style::Dim => "2",
            Style::Heading => "1",
        }
    }
}

impl Stylist for AnsiStylist {
    fn colorize(&self, text: &str, style: Style) -> String {
        format!("\x1b[{}m{text}\x1b[0m", Self::code(style))
    }
}

/// Greedy word wrap at `width` columns.
///
/// Existing line breaks are kept. A single word longer than `width` is
/// placed on its own line rather than split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / width.max(1));

    for (i, paragraph) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut column = 0;
        for word in paragraph.split_whitespace() {
            let len = word.chars().count();
            if column > 0 && column + 1 + len > width {
                out.push('\n');
                column = 0;
            } else if column > 0 {
                out.push(' ');
                column += 1;
            }
            out.push_str(word);
            column += len;
        }
    }
    out
}
