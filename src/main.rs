// Terminal cheatsheet viewer for HTML tags and CSS properties.

mod app;
mod cli;
mod clipboard;
mod content;
mod error;
mod logging;
mod paths;
mod state;
mod terminal;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use crate::app::App;
use crate::cli::Cli;
use crate::clipboard::SystemClipboard;
use crate::content::loader::resolve_table;
use crate::error::Result;
use crate::state::PageState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(paths::log_dir)
        .unwrap_or_else(|| PathBuf::from("logs"));
    let _log_guard = logging::init_or_warn(&log_dir);
    info!(page = cli.page.name(), log_dir = %log_dir.display(), "starting cheatsheet");

    // Content errors surface before the terminal is taken over.
    let report = resolve_table(cli.page, cli.content.as_deref())?;
    for skipped in &report.skipped {
        warn!(
            section = %skipped.section,
            position = skipped.position,
            reason = %skipped.reason,
            "entry not shown"
        );
    }

    let mut app = App::new(
        PageState::new(cli.page, report.table),
        Box::new(SystemClipboard::new()),
    );
    app.skipped_entries = report.skipped.len();

    let (mut terminal, _terminal_guard) = terminal::setup(!cli.no_mouse)?;
    let result = app.run(&mut terminal).await;
    terminal.show_cursor()?;
    result
}
