// file: src/prompt.rs
// version: 1.0.0
// guid: a47d0c5e-8b13-4f92-9d6a-2e3b7c81f054

//! Operator prompts
//!
//! The converter needs a handful of answers from the operator (credentials,
//! network names, which OS image a mixed group should boot). Everything that
//! asks goes through [`Prompter`] so the conversion core never touches the
//! terminal itself.

use crate::error::{ConvertError, Result};
use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of operator answers
pub trait Prompter {
    /// Ask a free-form question and return the first word of the answer
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Ask the operator to pick one of `options`; returns the chosen index
    fn choose(&mut self, question: &str, options: &[String]) -> Result<usize>;
}

/// Prompter backed by a line reader and a writer, normally stdin/stdout
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read the next non-empty answer, failing when input is closed
    fn read_answer(&mut self) -> Result<String> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConvertError::prompt("input closed before an answer was given"));
            }
            if let Some(word) = line.split_whitespace().next() {
                return Ok(word.to_string());
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_answer()
    }

    fn choose(&mut self, question: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(ConvertError::prompt("nothing to choose from"));
        }

        loop {
            writeln!(self.output, "{} Write only the number.", question)?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, option)?;
            }
            self.output.flush()?;

            let answer = self.read_answer()?;
            match answer.parse::<usize>() {
                Ok(num) if (1..=options.len()).contains(&num) => return Ok(num - 1),
                Ok(_) => writeln!(self.output, "{}", "Invalid number!".red())?,
                Err(_) => writeln!(self.output, "{}", "Invalid input!".red())?,
            }
        }
    }
}

/// Prompter answering from a fixed list, for unattended runs and tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    fn next_answer(&mut self, question: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| ConvertError::prompt(format!("no answer available for: {}", question)))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.next_answer(question)
    }

    fn choose(&mut self, question: &str, options: &[String]) -> Result<usize> {
        let answer = self.next_answer(question)?;
        match answer.parse::<usize>() {
            Ok(num) if (1..=options.len()).contains(&num) => Ok(num - 1),
            _ => Err(ConvertError::prompt(format!(
                "scripted answer \"{}\" is not a valid choice for: {}",
                answer, question
            ))),
        }
    }
}
