//! Line-oriented console output and input.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use th_core::Selectable;

use crate::messages::Messages;

/// Writes lists, descriptions and prompts.
#[derive(Debug)]
pub struct Printer<W> {
    out: W,
    color: bool,
    show_descriptions: bool,
}

impl<W: Write> Printer<W> {
    /// Create a plain printer that shows descriptions.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            show_descriptions: true,
        }
    }

    /// Enable or disable ANSI styling.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Show or hide entry details in lists.
    pub fn with_descriptions(mut self, show: bool) -> Self {
        self.show_descriptions = show;
        self
    }

    /// Print entries numbered from 1: `"1. label: detail"`.
    pub fn print_ordered<T: Selectable>(&mut self, entries: &[T]) -> io::Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            let line = self.entry_line(entry);
            writeln!(self.out, "{}. {line}", i + 1)?;
        }
        self.out.flush()
    }

    /// Print entries as a bulleted list: `"- label: detail"`.
    pub fn print_unordered<T: Selectable>(&mut self, entries: &[T]) -> io::Result<()> {
        for entry in entries {
            let line = self.entry_line(entry);
            writeln!(self.out, "- {line}")?;
        }
        self.out.flush()
    }

    /// Print an entity's string form on its own line.
    pub fn print(&mut self, entity: &impl Display) -> io::Result<()> {
        writeln!(self.out, "{entity}")?;
        self.out.flush()
    }

    /// Print a room or conversation heading.
    pub fn print_heading(&mut self, heading: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "\n{}", heading.bold().underline())?;
        } else {
            writeln!(self.out, "\n== {heading} ==")?;
        }
        self.out.flush()
    }

    /// Print a message line.
    pub fn print_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    /// Print an error or refusal.
    pub fn print_warning(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", message.yellow())?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()
    }

    /// Print the selection prompt without a trailing newline.
    pub fn print_prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{prompt} > ")?;
        self.out.flush()
    }

    /// Print a yes/no question followed by the hint matching `default`.
    pub fn print_boolean_prompt(
        &mut self,
        messages: &Messages,
        prompt: &str,
        default: Option<bool>,
    ) -> io::Result<()> {
        let hint = match default {
            None => &messages.boolean_options,
            Some(false) => &messages.boolean_options_no_default,
            Some(true) => &messages.boolean_options_yes_default,
        };
        write!(self.out, "{prompt} {hint} ")?;
        self.out.flush()
    }

    /// Consume the printer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn entry_line<T: Selectable>(&self, entry: &T) -> String {
        let label = if self.color {
            entry.label().bold().to_string()
        } else {
            entry.label().to_string()
        };
        if self.show_descriptions && !entry.detail().is_empty() {
            format!("{label}: {}", entry.detail())
        } else {
            label
        }
    }
}

/// A printer paired with a line reader.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    printer: Printer<W>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading from `input` and printing through `printer`.
    pub fn new(input: R, printer: Printer<W>) -> Self {
        Self { input, printer }
    }

    /// The printer.
    pub fn printer(&mut self) -> &mut Printer<W> {
        &mut self.printer
    }

    /// Block for one line of input, trimmed. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so a garbled line reads
    /// as an unrecognized choice.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Ask a yes/no question until it is answered. `None` at end of input.
    ///
    /// A blank answer takes `default` when there is one.
    pub fn ask_yes_no(
        &mut self,
        messages: &Messages,
        prompt: &str,
        default: Option<bool>,
    ) -> io::Result<Option<bool>> {
        loop {
            self.printer.print_boolean_prompt(messages, prompt, default)?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match (answer.to_lowercase().as_str(), default) {
                ("y" | "yes", _) => return Ok(Some(true)),
                ("n" | "no", _) => return Ok(Some(false)),
                ("", Some(default)) => return Ok(Some(default)),
                _ => self.printer.print_warning(&messages.boolean_invalid)?,
            }
        }
    }

    /// Consume the console, returning the printer's writer.
    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }
}
