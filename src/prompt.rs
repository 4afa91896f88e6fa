use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::plan::RenamePlan;

/// Asks whether a planned rename should go ahead.
pub trait Confirm {
    fn confirm(&mut self, plan: &RenamePlan) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&RenamePlan) -> bool,
{
    fn confirm(&mut self, plan: &RenamePlan) -> bool {
        self(plan)
    }
}

/// Prompts for every rename on a line based terminal.
///
/// Pressing enter, `y` or `yes` accepts. Anything else, including end of input, declines.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        TerminalPrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompt { input, output }
    }

    fn ask(&mut self, plan: &RenamePlan) -> io::Result<bool> {
        writeln!(
            self.output,
            "{}",
            format!("{} -> {}", plan.from.display(), plan.to.display()).blue()
        )?;
        write!(self.output, "Rename [Y/n]? ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, plan: &RenamePlan) -> bool {
        self.ask(plan).unwrap_or(false)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "y" | "yes"
    )
}
