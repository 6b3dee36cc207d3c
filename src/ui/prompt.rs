//! Yes/no questions asked on the terminal before destructive actions.

use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Ask `question` on stdin. `assume_yes` (the `--yes`/`--force` flags)
/// answers for the user without printing anything.
pub fn confirm(question: &str, assume_yes: bool) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Ok(ask(&mut stdin.lock(), &mut stdout.lock(), question)?)
}

/// Only `y` and `yes` (any case) agree; end of input declines.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
