//! Coloured terminal output.

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// The role a piece of text plays in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    /// Warnings go to stderr, everything else to stdout.
    const fn stream(self) -> Stream {
        match self {
            Self::Warning => Stream::Stderr,
            Self::Success | Self::Info => Stream::Stdout,
        }
    }

    fn paint(self, text: &str) -> String {
        if supports_color::on(self.stream()).is_none() {
            return text.to_string();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().bold().to_string(),
            Self::Info => text.fg::<css::LightBlue>().to_string(),
        }
    }
}

/// Extension trait for colouring text by its role, when the terminal allows.
pub trait Colorize {
    /// Green, for completed actions.
    fn success(&self) -> String;
    /// Bold orange, for problems that did not stop the command.
    fn warning(&self) -> String;
    /// Light blue, for headings.
    fn info(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        Tone::Success.paint(self.as_ref())
    }

    fn warning(&self) -> String {
        Tone::Warning.paint(self.as_ref())
    }

    fn info(&self) -> String {
        Tone::Info.paint(self.as_ref())
    }
}

/// Print a warning on stderr, the stream its colour was chosen for.
pub fn print_warning(message: &str) {
    eprintln!("{}", message.warning());
}
