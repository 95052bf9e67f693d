//! Interactive target prompt

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Ask for a target host until a non-blank line is entered.
///
/// Fails on end of input, so a closed stdin cannot spin forever.
pub fn prompt_target<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    loop {
        write!(output, "Target host or IP: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Could not read target from stdin")?;
        if read == 0 {
            bail!("No target given. Pass it as an argument: tunnelbench <TARGET>");
        }

        let target = line.trim();
        if !target.is_empty() {
            return Ok(target.to_string());
        }
    }
}
