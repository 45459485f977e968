//! Output styling shared by the run and the setup wizard.

use console::Style;

/// `✓ msg` in green.
pub fn success(msg: &str) -> String {
    format!("{} {}", Style::new().green().apply_to("✓"), msg)
}

/// `✗ msg` in red, used for the final error line.
pub fn error(msg: &str) -> String {
    format!("{} {}", Style::new().red().apply_to("✗"), msg)
}

/// `=== title ===` in bold cyan.
pub fn banner(title: &str) -> String {
    Style::new()
        .cyan()
        .bold()
        .apply_to(format!("=== {} ===", title))
        .to_string()
}

/// Secondary guidance, dimmed.
pub fn hint(msg: &str) -> String {
    Style::new().dim().apply_to(msg).to_string()
}
