// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmationRequest {
    pub fn delete_expense() -> Self {
        Self {
            title: "Delete Expense".into(),
            message: "Are you sure you want to delete this expense? This action cannot be undone."
                .into(),
            confirm_text: "Delete".into(),
            cancel_text: "Cancel".into(),
        }
    }
}

pub trait Confirm {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Result<bool>;
}

/// Always gives the same answer (`--yes`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _request: &ConfirmationRequest) -> Result<bool> {
        Ok(self.0)
    }
}

/// Prompts on `output` and reads a y/n answer from `input`. End of input
/// counts as cancel.
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Result<bool> {
        writeln!(self.output, "{}", request.title)?;
        writeln!(self.output, "{}", request.message)?;
        write!(
            self.output,
            "[y] {} / [N] {}: ",
            request.confirm_text, request.cancel_text
        )?;
        self.output.flush()?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read confirmation")?;
        let answer = line.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes" || answer == request.confirm_text.to_lowercase())
    }
}

/// [`TerminalConfirm`] over stdin/stderr. Stdin is only locked for the
/// duration of one prompt so an interactive shell can keep reading from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioConfirm;

impl Confirm for StdioConfirm {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut lock = stdin.lock();
        TerminalConfirm::new(&mut lock, std::io::stderr()).confirm(request)
    }
}
