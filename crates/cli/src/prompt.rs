// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive store selection and confirmation

use crate::display::menu;
use dsr_core::{parse_selection, DocumentStore};
use std::io::{self, BufRead, Write};

/// What the user chose from the menu
#[derive(Debug, PartialEq)]
pub enum Choice<'a> {
    Selected(Vec<&'a DocumentStore>),
    Quit,
}

/// Show the menu and ask until the user confirms a selection or quits.
/// End of input counts as quitting.
pub fn choose_stores<'a, R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    stores: &[&'a DocumentStore],
) -> io::Result<Choice<'a>> {
    loop {
        writeln!(out, "{}", menu(stores))?;
        writeln!(out)?;
        writeln!(out, "Enter store numbers to refresh:")?;
        writeln!(out, "   Examples: '1' or '1,3,5' or '1-5' or 'all'")?;
        writeln!(out, "   Enter 'q' to quit")?;
        writeln!(out)?;

        let selected = loop {
            let Some(line) = ask(input, out, "Your selection: ")? else {
                return Ok(Choice::Quit);
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(Choice::Quit);
            }

            let selection = parse_selection(&line, stores.len());
            for rejected in &selection.rejected {
                writeln!(out, "{}", rejected)?;
            }
            if selection.is_empty() {
                writeln!(out, "No valid stores selected. Please try again.")?;
                writeln!(out)?;
                continue;
            }
            break selection.pick(stores).into_iter().copied().collect::<Vec<_>>();
        };

        writeln!(out)?;
        writeln!(out, "Selected {} store(s):", selected.len())?;
        for store in &selected {
            writeln!(out, "   - {}", store.label())?;
        }

        if confirm(input, out, "Proceed with refresh?")? {
            return Ok(Choice::Selected(selected));
        }
        writeln!(out)?;
        writeln!(out, "Let's try again.")?;
        writeln!(out)?;
    }
}

/// Ask a yes/no question; anything but `y`/`yes` (including end of input) is no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    Ok(answer_yes_no(input, out, question)?.unwrap_or(false))
}

/// Ask a yes/no question; `None` when input ends before an answer
pub fn answer_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<bool>> {
    writeln!(out)?;
    let answer = ask(input, out, &format!("{} (y/n): ", question))?;
    Ok(answer.map(|a| matches!(a.to_ascii_lowercase().as_str(), "y" | "yes")))
}

/// Print `prompt` and read one trimmed line, `None` at end of input
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
