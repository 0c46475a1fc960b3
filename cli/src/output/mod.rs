//! Terminal output: message lines, status blocks and hints.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Kind of a one-line message. Each kind has exactly one leading mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Step,
    Ok,
    Warn,
    Error,
    Note,
}

impl Mark {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Step => "→",
            Mark::Ok => "✓",
            Mark::Warn => "!",
            Mark::Error => "✗",
            Mark::Note => "ℹ",
        }
    }

    fn style(self, styles: &Styles) -> Style {
        match self {
            Mark::Step => styles.step,
            Mark::Ok => styles.ok,
            Mark::Warn => styles.warn,
            Mark::Error => styles.error,
            Mark::Note => styles.note,
        }
    }
}

/// `NO_COLOR` counts only when set to a non-empty value.
fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Where and how command output is written.
pub struct OutputContext {
    pub styles: Styles,
    pub is_tty: bool,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Colour is used only on a terminal, and never when `--no-color` or
    /// `NO_COLOR` is set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let styles = if is_tty && !no_color && !no_color_env() {
            Styles::colored()
        } else {
            Styles::default()
        };
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Render a message line with its leading mark.
    #[must_use]
    pub fn format_line(&self, mark: Mark, msg: &str) -> String {
        format!("  {} {msg}", mark.symbol().style(mark.style(&self.styles)))
    }

    fn line(&self, mark: Mark, msg: &str) {
        if mark == Mark::Error {
            eprintln!("{}", self.format_line(mark, msg));
        } else if !self.quiet {
            println!("{}", self.format_line(mark, msg));
        }
    }

    pub fn step(&self, msg: &str) {
        self.line(Mark::Step, msg);
    }

    pub fn success(&self, msg: &str) {
        self.line(Mark::Ok, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.line(Mark::Warn, msg);
    }

    /// Goes to stderr and ignores `quiet`.
    pub fn error(&self, msg: &str) {
        self.line(Mark::Error, msg);
    }

    pub fn info(&self, msg: &str) {
        self.line(Mark::Note, msg);
    }

    pub fn title(&self, text: &str) {
        if !self.quiet {
            println!("  {}", text.style(self.styles.title));
        }
    }

    /// One `label value` row of a status block.
    pub fn field(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", label.style(self.styles.label));
        }
    }

    /// Suggest a follow-up command.
    pub fn hint(&self, label: &str, command: &str) {
        if !self.quiet {
            println!(
                "  {}  {}",
                label.style(self.styles.label),
                command.style(self.styles.command)
            );
        }
    }
}
