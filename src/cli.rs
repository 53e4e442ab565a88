// Command-line argument parsing.
// Selects the page, an optional content file, and terminal/logging options.

use std::path::PathBuf;

use clap::Parser;

use crate::content::Page;

/// Command-line arguments.
///
/// Content precedence: `--content`, then `<config dir>/<page>.json` if it
/// exists, then the built-in table.
#[derive(Debug, Parser)]
#[command(
    name = "cheatsheet",
    about = "Interactive HTML and CSS cheatsheets in the terminal",
    version,
    after_help = "Examples:\n  cheatsheet\n  cheatsheet --page css\n  cheatsheet --content ./my-tags.json --no-mouse\n"
)]
pub struct Cli {
    /// Cheatsheet page to open
    #[arg(long, short = 'p', value_enum, default_value_t = Page::Html)]
    pub page: Page,

    /// JSON file replacing the page's built-in content
    #[arg(long, short = 'c')]
    pub content: Option<PathBuf>,

    /// Directory for log files (defaults to the platform cache dir)
    #[arg(long, env = "CHEATSHEET_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,
}
