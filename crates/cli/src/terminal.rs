//! Interactive terminal backed by `dialoguer` prompts and an `indicatif`
//! spinner for network operations.

use std::io;
use std::time::Duration;

use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use git_multi_push_core::Terminal;

use crate::style;

#[derive(Default)]
pub struct ConsoleTerminal {
    spinner: Option<ProgressBar>,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn into_io(err: dialoguer::Error) -> io::Error {
    match err {
        dialoguer::Error::IO(e) => e,
    }
}

impl Terminal for ConsoleTerminal {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.clear_spinner();
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(into_io)
    }

    fn input(&mut self, prompt: &str) -> io::Result<String> {
        self.clear_spinner();
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(into_io)?;
        Ok(value.trim().to_string())
    }

    fn say(&mut self, line: &str) {
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => println!("{}", line),
        }
    }

    fn success(&mut self, line: &str) {
        let styled = style::success(line);
        self.say(&styled);
    }

    fn begin_activity(&mut self, message: &str) {
        self.clear_spinner();
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            spinner.set_style(
                template.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn end_activity(&mut self) {
        self.clear_spinner();
    }
}
