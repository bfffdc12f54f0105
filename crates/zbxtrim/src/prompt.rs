//! Interactive yes/no confirmation

use std::io::{self, BufRead, Write};

/// Answers that allow a mutation to proceed; compared after trim + lowercase
const AFFIRMATIVE: [&str; 5] = ["s", "si", "sí", "y", "yes"];

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Ask `question` and block for one line. Empty input and EOF decline.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(out, "{question} (y/N): ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(is_affirmative(&line))
}
