use crate::core::{InteractionPort, Result};
use crate::utils::error::ContactBookError;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

pub const INVALID_OPTION: &str = "ERROR: Invalid option.";

/// 解析數字選項；超出範圍或不是整數時回傳 `None`
pub fn parse_choice(input: &str, valid: &RangeInclusive<i64>) -> Option<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|choice| valid.contains(choice))
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// 終端機互動：從 `input` 逐行讀取，提示與訊息寫到 `output`
pub struct ConsolePort<R: BufRead, W: Write> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> ConsolePort<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ContactBookError::InputClosed {
                prompt: prompt.to_string(),
            });
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn ask_until<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Some(value) => return Ok(value),
                None => self.show(INVALID_OPTION),
            }
        }
    }
}

impl<R: BufRead, W: Write> InteractionPort for ConsolePort<R, W> {
    fn show(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }

    fn ask_choice(&mut self, prompt: &str, valid: RangeInclusive<i64>) -> Result<i64> {
        self.ask_until(prompt, |line| parse_choice(line, &valid))
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.ask_until(prompt, parse_yes_no)
    }

    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    fn clear(&mut self) {
        if self.clear_screen {
            let _ = write!(self.output, "\x1B[2J\x1B[1;1H");
        }
    }
}
