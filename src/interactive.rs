//! Menu-driven prompt loop.
//!
//! Reads answers line by line from any [`BufRead`] and writes prompts and
//! results to any [`Write`], so the same loop serves a terminal and scripted
//! tests. End of input ends the session cleanly.

use crate::collect::OutputFormat;
use crate::config::Settings;
use crate::error::{Result, ToolkitError};
use crate::keywords::KeywordSource;
use crate::session::{Operation, Session};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const MENU: &str = "Choose an action (1: Add Serial Number, 2: Delete Attribute, \
3: Count Objects, 4: Collect Keys, 5: Remove Duplicates, 6: Keyword Matching, 0: Exit): ";

/// Prompt/answer channel over a reader and a writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `question` and returns the trimmed answer, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails if the terminal cannot be read or written.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Like [`ask`](Self::ask) but rejects a blank answer.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::InvalidParameter`] for a blank answer.
    pub fn ask_required(&mut self, question: &str, what: &str) -> Result<Option<String>> {
        match self.ask(question)? {
            Some(answer) if answer.is_empty() => Err(ToolkitError::InvalidParameter(format!(
                "{what} must not be empty"
            ))),
            answer => Ok(answer),
        }
    }

    /// Writes one line of output.
    ///
    /// # Errors
    ///
    /// Fails if the output cannot be written.
    pub fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Runs the menu loop until `0` or end of input.
///
/// When `input_path` is `None` the operator is asked for the dataset file
/// first. Parameter errors are reported and the loop continues; load and
/// I/O errors end it.
///
/// # Errors
///
/// Returns the first non-recoverable error.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    input_path: Option<&Path>,
    settings: Settings,
) -> Result<()> {
    let path = match input_path {
        Some(path) => path.to_path_buf(),
        None => match prompter.ask_required("Enter the filename of the JSON file: ", "input file")? {
            Some(answer) => PathBuf::from(answer),
            None => return Ok(()),
        },
    };
    let mut session = Session::open(&path, settings)?;

    loop {
        let Some(choice) = prompter.ask(MENU)? else {
            break;
        };
        if choice == "0" {
            prompter.say("Exiting the program.")?;
            break;
        }

        let operation = match read_operation(prompter, &choice) {
            Ok(Some(operation)) => operation,
            Ok(None) => break,
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Recoverable error: {e}");
                prompter.say(format!("Error: {e}"))?;
                continue;
            }
            Err(e) => return Err(e),
        };

        match session.execute(operation) {
            Ok(outcome) => prompter.say(outcome)?,
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Recoverable error: {e}");
                prompter.say(format!("Error: {e}"))?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Asks for the parameters of the chosen operation. `None` means input ended.
fn read_operation<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    choice: &str,
) -> Result<Option<Operation>> {
    const OUTPUT_JSON: &str = "Enter the filename for the output JSON: ";

    let operation = match choice {
        "1" => {
            let Some(output) = prompter.ask_required(OUTPUT_JSON, "output file")? else {
                return Ok(None);
            };
            Operation::SerialNumber {
                output: output.into(),
            }
        }
        "2" => {
            let Some(attribute) =
                prompter.ask_required("Enter the attribute name to delete: ", "attribute name")?
            else {
                return Ok(None);
            };
            let Some(output) = prompter.ask_required(OUTPUT_JSON, "output file")? else {
                return Ok(None);
            };
            Operation::DeleteAttribute {
                attribute,
                output: output.into(),
            }
        }
        "3" => Operation::Count,
        "4" => {
            let Some(attributes) = prompter.ask(
                "Enter the attribute names to collect keys from, separated by commas: ",
            )?
            else {
                return Ok(None);
            };
            let Some(format) = prompter.ask("Do you want the output in JSON or CSV? (json/csv): ")?
            else {
                return Ok(None);
            };
            let format: OutputFormat = format.parse()?;
            let Some(prefix) = prompter.ask("Enter the prefix for the output files: ")? else {
                return Ok(None);
            };
            Operation::CollectKeys {
                attributes: split_list(&attributes),
                format,
                prefix,
            }
        }
        "5" => {
            let Some(output) = prompter.ask_required(OUTPUT_JSON, "output file")? else {
                return Ok(None);
            };
            Operation::RemoveDuplicates {
                output: output.into(),
            }
        }
        "6" => {
            let Some(source) = prompter
                .ask("Do you want to provide keywords via a file or manually? (file/manual): ")?
            else {
                return Ok(None);
            };
            let keywords = if source.eq_ignore_ascii_case("file") {
                let Some(path) = prompter.ask_required(
                    "Enter the filename for the keyword list file: ",
                    "keyword file",
                )?
                else {
                    return Ok(None);
                };
                KeywordSource::File(path.into())
            } else {
                let Some(line) = prompter.ask("Enter keywords separated by commas: ")? else {
                    return Ok(None);
                };
                KeywordSource::Inline(line)
            };
            let Some(output) = prompter.ask_required(
                "Enter the filename for the output JSON with matched keywords: ",
                "output file",
            )?
            else {
                return Ok(None);
            };
            let Some(want_stats) =
                prompter.ask("Do you want keyword matching stats? (yes/no): ")?
            else {
                return Ok(None);
            };
            let stats = if want_stats.eq_ignore_ascii_case("yes") {
                let Some(path) = prompter
                    .ask_required("Enter the filename for the stats CSV file: ", "stats file")?
                else {
                    return Ok(None);
                };
                Some(PathBuf::from(path))
            } else {
                None
            };
            Operation::KeywordMatch {
                keywords,
                output: output.into(),
                stats,
            }
        }
        other => {
            return Err(ToolkitError::InvalidParameter(format!(
                "Invalid Choice '{other}'"
            )));
        }
    };
    Ok(Some(operation))
}

/// Splits a comma-separated answer, trimming entries and dropping blanks.
fn split_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
