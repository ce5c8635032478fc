//! # Interactive Prompts
//!
//! Asks the user for the mode, message, image path and text colour. Reads
//! from any [`BufRead`] and writes to any [`Write`], so the whole dialogue can
//! be scripted in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::common::error::StegoError;
use crate::processing::overlay::TextColor;

/// What the user wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a line for the user.
    pub fn say(&mut self, text: &str) -> Result<(), StegoError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `prompt` and read one line without its line ending.
    fn ask(&mut self, prompt: &str) -> Result<String, StegoError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(StegoError::InputClosed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// `e` selects encoding, `d` decoding; anything else gives `None`.
    pub fn choose_mode(&mut self) -> Result<Option<Mode>, StegoError> {
        let answer = self.ask("Do you want to encode or decode an image? (e/d): ")?;
        Ok(match answer.trim().to_lowercase().as_str() {
            "e" => Some(Mode::Encode),
            "d" => Some(Mode::Decode),
            _ => None,
        })
    }

    /// The message to hide, taken verbatim (it may be empty).
    pub fn read_message(&mut self) -> Result<String, StegoError> {
        self.ask("Enter the message you want to hide: ")
    }

    /// Ask until the answer names an existing path.
    pub fn read_existing_path(&mut self, prompt: &str) -> Result<PathBuf, StegoError> {
        loop {
            let answer = self.ask(prompt)?;
            let path = PathBuf::from(clean_path(&answer));
            if path.exists() {
                return Ok(path);
            }
            self.say(&format!("❌ File not found: {}", path.display()))?;
        }
    }

    /// Ask until the answer is `red` or `white`.
    pub fn read_color(&mut self) -> Result<TextColor, StegoError> {
        let mut answer = self.ask("Do you want the visible text in red or white? (red/white): ")?;
        loop {
            if let Ok(color) = answer.parse::<TextColor>() {
                return Ok(color);
            }
            answer = self.ask("Please choose either 'red' or 'white': ")?;
        }
    }
}

/// Strip surrounding whitespace and quote characters from a pasted path.
fn clean_path(raw: &str) -> &str {
    raw.trim().trim_matches(|c: char| c == '"' || c == '\'').trim()
}
