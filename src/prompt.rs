//! Interactive prompts.

use std::io::{self, BufRead, IsTerminal, Read};

use inquire::{Confirm, Text, error::InquireError};

use crate::error::{Error, Result};

/// Questions a command may ask the user.
pub trait Prompt {
    /// Ask a yes/no question that defaults to no.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Ask for a single line of text, trimmed.
    fn text(&self, message: &str) -> Result<String>;

    /// Print `message` and read a request body until end of input, trimmed.
    fn read_body(&self, message: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
///
/// When stdin is piped, questions are printed and answered by one line of
/// input each, so `echo y | n8nctl workflows preview` works.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Prompt for Terminal {
    fn confirm(&self, message: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            println!("{message} (y/N):");
            return Ok(is_yes(&read_answer(&mut io::stdin().lock())?));
        }
        Confirm::new(message)
            .with_default(false)
            .prompt()
            .map_err(prompt_error)
    }

    fn text(&self, message: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            println!("{message}");
            return read_answer(&mut io::stdin().lock());
        }
        Text::new(message)
            .prompt()
            .map(|value| value.trim().to_string())
            .map_err(prompt_error)
    }

    fn read_body(&self, message: &str) -> Result<String> {
        println!("{message}");
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .map_err(|error| Error::StdinRead { source: error })?;
        Ok(body.trim().to_string())
    }
}

/// Read one line of input, trimmed. End of input reads as empty.
fn read_answer(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|error| Error::StdinRead { source: error })?;
    Ok(line.trim().to_string())
}

/// `y` or `yes`, in any case.
fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Map inquire failures onto crate errors.
fn prompt_error(error: InquireError) -> Error {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            Error::PromptCanceled
        }
        error => Error::PromptFailed {
            message: error.to_string(),
        },
    }
}
