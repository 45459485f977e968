//! The interactive surface the run talks to.
//!
//! The orchestrator and setup flow only see this trait. The CLI backs it with
//! real prompts; tests back it with scripted answers.

use std::io;

pub trait Terminal {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;

    /// Read one line of free text, trimmed. May be empty.
    fn input(&mut self, prompt: &str) -> io::Result<String>;

    /// Print an informational line.
    fn say(&mut self, line: &str);

    /// Print a line reporting a completed step.
    fn success(&mut self, line: &str) {
        self.say(line);
    }

    /// A potentially slow operation is starting.
    fn begin_activity(&mut self, _message: &str) {}

    /// The operation announced by [`Terminal::begin_activity`] has finished.
    fn end_activity(&mut self) {}
}
