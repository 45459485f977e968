//! Scripted stand-ins for `git` and the terminal used by unit tests.

#![cfg(test)]

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::GitError;
use crate::git::{GitOutput, GitRunner};
use crate::terminal::Terminal;

/// A [`GitRunner`] that answers from a table of argument prefixes.
///
/// The first rule whose prefix matches wins. A rule with several outputs
/// hands them out in order and keeps repeating the last one. Commands with no
/// matching rule succeed with empty output. Every call is recorded.
#[derive(Debug, Default)]
pub struct ScriptedGit {
    rules: Mutex<Vec<(Vec<String>, VecDeque<GitOutput>)>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, prefix: &[&str], output: GitOutput) -> Self {
        self.on_seq(prefix, vec![output])
    }

    pub fn on_seq(self, prefix: &[&str], outputs: Vec<GitOutput>) -> Self {
        self.rules.lock().unwrap().push((
            prefix.iter().map(|s| s.to_string()).collect(),
            outputs.into(),
        ));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any recorded call starts with `prefix`.
    pub fn was_called(&self, prefix: &[&str]) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| starts_with(call, prefix))
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| starts_with(call, prefix))
            .count()
    }
}

fn starts_with(call: &[String], prefix: &[&str]) -> bool {
    call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let call: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.lock().unwrap().push(call.clone());

        let mut rules = self.rules.lock().unwrap();
        for (prefix, outputs) in rules.iter_mut() {
            let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
            if starts_with(&call, &prefix) {
                let out = if outputs.len() > 1 {
                    outputs.pop_front().unwrap_or_default()
                } else {
                    outputs.front().cloned().unwrap_or_default()
                };
                return Ok(out);
            }
        }
        Ok(GitOutput::ok(""))
    }
}

/// A [`Terminal`] replaying canned answers and recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    confirms: VecDeque<bool>,
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub lines: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn input_with(mut self, answer: &str) -> Self {
        self.inputs.push_back(answer.to_string());
        self
    }

    /// Whether any printed line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl Terminal for ScriptedTerminal {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.prompts.push(prompt.to_string());
        self.confirms
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted confirm left"))
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted input left"))
    }

    fn say(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
