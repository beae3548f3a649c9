#![forbid(unsafe_code)]

//! Printer with colorization support
//!
//! Plain text, sections, warnings and success lines go to stdout. Error
//! messages go to stderr so that scripted usage can keep the two apart.

use std::cell::RefCell;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Something that can show text to the user
pub trait Printing {
    /// Prints plain text followed by a newline
    fn print(&self, text: &str);

    /// Prints a highlighted section header
    fn print_section(&self, text: &str);

    /// Prints a warning, prefixed with `Warning: `
    fn print_warning(&self, text: &str);

    /// Prints an error message to stderr, prefixed with `Error: `
    fn print_error_message(&self, text: &str);

    /// Prints a success line
    fn print_success(&self, text: &str);
}

/// Terminal printer backed by `termcolor` standard streams
pub struct Printer {
    color_choice: ColorChoice,
}

impl Printer {
    /// Creates a new Printer with the specified color choice
    pub fn new(color_choice: ColorChoice) -> Self {
        Printer { color_choice }
    }

    fn write_line(
        stream: &mut StandardStream,
        prefix: Option<(&str, &ColorSpec)>,
        text: &str,
        spec: Option<&ColorSpec>,
    ) -> io::Result<()> {
        if let Some((prefix, prefix_spec)) = prefix {
            stream.set_color(prefix_spec)?;
            write!(stream, "{}", prefix)?;
            stream.reset()?;
        }
        if let Some(spec) = spec {
            stream.set_color(spec)?;
        }
        write!(stream, "{}", text)?;
        stream.reset()?;
        writeln!(stream)?;
        stream.flush()
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.color_choice)
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.color_choice)
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

// Write failures (closed pipe, full disk) are not reportable anywhere else,
// so the trait methods drop them.
impl Printing for Printer {
    fn print(&self, text: &str) {
        let _ = Self::write_line(&mut self.stdout(), None, text, None);
    }

    fn print_section(&self, text: &str) {
        let spec = ColorSpec::new()
            .set_fg(Some(Color::Cyan))
            .set_bold(true)
            .clone();
        let _ = Self::write_line(&mut self.stdout(), None, text, Some(&spec));
    }

    fn print_warning(&self, text: &str) {
        let spec = ColorSpec::new()
            .set_fg(Some(Color::Yellow))
            .set_bold(true)
            .clone();
        let _ = Self::write_line(&mut self.stdout(), Some(("Warning: ", &spec)), text, None);
    }

    fn print_error_message(&self, text: &str) {
        let spec = ColorSpec::new()
            .set_fg(Some(Color::Red))
            .set_bold(true)
            .clone();
        let _ = Self::write_line(&mut self.stderr(), Some(("Error: ", &spec)), text, None);
    }

    fn print_success(&self, text: &str) {
        let spec = ColorSpec::new()
            .set_fg(Some(Color::Green))
            .set_bold(true)
            .clone();
        let _ = Self::write_line(&mut self.stdout(), None, text, Some(&spec));
    }
}

/// In-memory printer
///
/// Captures everything that would go to stdout and stderr, without colors,
/// using the same prefixes as [`Printer`]. Useful when embedding the command
/// registry and in tests.
#[derive(Debug, Default)]
pub struct BufferPrinter {
    stdout: RefCell<String>,
    stderr: RefCell<String>,
}

impl BufferPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed to stdout so far
    pub fn output(&self) -> String {
        self.stdout.borrow().clone()
    }

    /// Everything printed to stderr so far
    pub fn errors(&self) -> String {
        self.stderr.borrow().clone()
    }

    fn push(buffer: &RefCell<String>, text: &str) {
        let mut buffer = buffer.borrow_mut();
        buffer.push_str(text);
        buffer.push('\n');
    }
}

impl Printing for BufferPrinter {
    fn print(&self, text: &str) {
        Self::push(&self.stdout, text);
    }

    fn print_section(&self, text: &str) {
        Self::push(&self.stdout, text);
    }

    fn print_warning(&self, text: &str) {
        Self::push(&self.stdout, &format!("Warning: {}", text));
    }

    fn print_error_message(&self, text: &str) {
        Self::push(&self.stderr, &format!("Error: {}", text));
    }

    fn print_success(&self, text: &str) {
        Self::push(&self.stdout, text);
    }
}
