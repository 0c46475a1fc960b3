//! Terminal palette.

use owo_colors::Style;

/// Styles for every kind of terminal line. `Default` is the plain palette
/// used when colour is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    pub ok: Style,
    pub warn: Style,
    pub error: Style,
    pub note: Style,
    pub step: Style,
    /// Field labels in status blocks.
    pub label: Style,
    /// Section titles.
    pub title: Style,
    /// Menu entry numbers.
    pub key: Style,
    /// Suggested commands in hints.
    pub command: Style,
}

impl Styles {
    /// Palette for colour-capable terminals.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            error: Style::new().red().bold(),
            note: Style::new().blue(),
            step: Style::new().cyan(),
            label: Style::new().dimmed(),
            title: Style::new().bold().cyan(),
            key: Style::new().bold().magenta(),
            command: Style::new().bold(),
        }
    }
}
