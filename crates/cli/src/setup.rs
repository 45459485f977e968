//! `--setup`: interactive configuration wizard.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use git_multi_push_core::config::Config;
use git_multi_push_core::remote::Host;
use git_multi_push_core::setup::run_setup;

use crate::style;
use crate::terminal::ConsoleTerminal;

/// Run the wizard, write the config to `path` and show the resulting remotes.
pub fn run(path: &Path) -> Result<()> {
    println!();
    println!("{}", style::banner("git-multi-push setup"));
    println!();
    println!("Enter the accounts to push to. Repository names may be given as full URLs.");
    println!();

    let mut term = ConsoleTerminal::new();
    let config = run_setup(&mut term, path).context("setup failed")?;

    println!();
    println!("{}", remotes_table(&config));
    println!();
    println!(
        "{}",
        style::hint("Run git-multi-push inside a repository to push to these remotes.")
    );
    println!();

    Ok(())
}

fn remotes_table(config: &Config) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Remote", "Host", "URL"]);

    let targets = config.remote_targets();
    for host in Host::ALL {
        match targets.iter().find(|t| t.host == host) {
            Some(target) => table.add_row(vec![
                Cell::new(&target.name),
                Cell::new(host.display_name()),
                Cell::new(&target.url),
            ]),
            None => table.add_row(vec![
                Cell::new(host.remote_name()),
                Cell::new(host.display_name()),
                Cell::new("not configured").fg(comfy_table::Color::DarkGrey),
            ]),
        };
    }

    table
}
