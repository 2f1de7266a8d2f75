//! Interactive session over line-oriented input.
//!
//! Each line is evaluated and its result printed; results are kept in a
//! [`History`] that `reset` clears.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::calculator::{CalcResult, FormatOptions, evaluate_expression, looks_like_expression};
use crate::history::History;

/// How results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Display result (thousand separators if configured).
    #[default]
    Display,
    /// Result without separators.
    Raw,
    /// One JSON object per result.
    Json,
}

/// Commands recognized in the interactive session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Reset,
    History,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "reset" => Some(Self::Reset),
            "history" => Some(Self::History),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub struct Session {
    options: FormatOptions,
    style: OutputStyle,
    history: History,
}

impl Session {
    pub fn new(options: FormatOptions, style: OutputStyle, history_limit: usize) -> Self {
        Self {
            options,
            style,
            history: History::new(history_limit),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Evaluate one input and record it.
    pub fn evaluate(&mut self, input: &str) -> CalcResult {
        let mut result = evaluate_expression(input, &self.options);
        if let CalcResult::Error {
            expression,
            message,
        } = &mut result
        {
            if !looks_like_expression(expression) {
                *message = format!("Unknown command: {}", expression);
            }
        }

        info!("Input: {}", input);
        info!("Output: {}", result.display());
        self.history.record(&result);
        result
    }

    /// Render a result according to the output style.
    pub fn render(&self, result: &CalcResult) -> Result<String> {
        match self.style {
            OutputStyle::Json => {
                serde_json::to_string(result).context("Failed to serialize result")
            }
            OutputStyle::Raw => Ok(result.raw().unwrap_or(result.display()).to_string()),
            OutputStyle::Display => Ok(result.display().to_string()),
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
        info!("History reset");
    }

    /// Read lines until end of input or `quit`.
    ///
    /// The prompt is written before each line when given. Only the line
    /// terminator is stripped; other whitespace is part of the expression.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
        prompt: Option<&str>,
    ) -> Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = prompt {
                write!(writer, "{}", prompt).context("Failed to write prompt")?;
                writer.flush().context("Failed to flush output")?;
            }

            line.clear();
            let read = reader
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                break;
            }

            let input = strip_line_ending(&line);
            if input.trim().is_empty() {
                continue;
            }

            match Command::parse(input) {
                Some(Command::Quit) => break,
                Some(Command::Reset) => self.reset(),
                Some(Command::History) => self.write_history(&mut writer)?,
                None => {
                    let result = self.evaluate(input);
                    writeln!(writer, "{}", self.render(&result)?)
                        .context("Failed to write result")?;
                }
            }
        }
        Ok(())
    }

    fn write_history<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in self.history.entries() {
            let separator = if entry.is_error { ":" } else { " =" };
            writeln!(
                writer,
                "{}{} {}",
                entry.expression, separator, entry.display_result
            )
            .context("Failed to write history")?;
        }
        Ok(())
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
