//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(name = "steampatch", version)]
#[command(about = "Find Steam games and swap steam_api for a bundled replacement")]
pub struct Cli {
    /// Root directory to search for Steam games
    #[arg(default_value = ".")]
    pub search_dir: PathBuf,

    /// Search in any directory (default: only "steamapps" directories)
    #[arg(short = 'a', long)]
    pub any_dir: bool,

    /// Directory holding steam_api.dll(.gz) and steam_api64.dll(.gz)
    #[arg(long, env = "STEAMPATCH_PAYLOAD_DIR")]
    pub payload_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/steampatch/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    #[command(flatten)]
    pub mode: ModeArgs,
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// List Steam games found
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Patch Steam games found
    #[arg(short = 'p', long)]
    pub patch: bool,

    /// Unpatch Steam games found
    #[arg(short = 'u', long)]
    pub unpatch: bool,

    /// Ask an action for each Steam game found (default)
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

/// Selected run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List { json: bool },
    Patch,
    Unpatch,
    Interactive,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        let m = &self.mode;
        // At most one flag is set; none means interactive
        match (m.list, m.patch, m.unpatch, m.interactive) {
            (true, ..) => Mode::List { json: self.json },
            (_, true, ..) => Mode::Patch,
            (_, _, true, _) => Mode::Unpatch,
            (_, _, _, true) | (false, false, false, false) => Mode::Interactive,
        }
    }
}
