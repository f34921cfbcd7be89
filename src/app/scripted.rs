use crate::app::console::{parse_choice, parse_yes_no, INVALID_OPTION};
use crate::core::{InteractionPort, Result};
use crate::utils::error::ContactBookError;
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// 依序回放預先準備的答案，並記錄整段對話。
///
/// 答案用完時回傳 `InputClosed`，方便在測試中驗證流程沒有多問問題。
#[derive(Debug, Default)]
pub struct ScriptedPort {
    answers: VecDeque<String>,
    transcript: String,
    prompts_asked: usize,
}

impl ScriptedPort {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// 問過的提示次數（含重新詢問）
    pub fn prompts_asked(&self) -> usize {
        self.prompts_asked
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String> {
        self.prompts_asked += 1;
        self.transcript.push_str(prompt);

        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| ContactBookError::InputClosed {
                prompt: prompt.to_string(),
            })?;

        self.transcript.push_str(&answer);
        self.transcript.push('\n');
        Ok(answer)
    }

    fn ask_until<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        loop {
            let answer = self.next_answer(prompt)?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.show(INVALID_OPTION),
            }
        }
    }
}

impl InteractionPort for ScriptedPort {
    fn show(&mut self, text: &str) {
        self.transcript.push_str(text);
        self.transcript.push('\n');
    }

    fn ask_choice(&mut self, prompt: &str, valid: RangeInclusive<i64>) -> Result<i64> {
        self.ask_until(prompt, |answer| parse_choice(answer, &valid))
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.ask_until(prompt, parse_yes_no)
    }

    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        self.next_answer(prompt)
    }
}
