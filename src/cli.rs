use clap::Parser;
use std::path::PathBuf;

use crate::config::NozomiConfig;

#[derive(Parser, Debug)]
#[command(name = "nozomi")]
#[command(version)]
#[command(about = "Print the gallery IDs on a listing page", long_about = None)]
#[command(after_help = "Examples:\n  \
  nozomi 'tag/female:filming-english.html?page=2'     IDs on page 2 of a tag listing\n  \
  nozomi -r https://hitomi.la/popular/today-all.html   show how a URL resolves\n  \
  nozomi -a -m ./mirror series/some-series-all.html    whole index from a local mirror")]
pub struct Cli {
    /// Listing path or full site URL
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Config file (default: ~/.config/nozomi/config.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host serving the index files
    #[arg(short = 'd', long, value_name = "HOST")]
    pub domain: Option<String>,

    /// Gallery IDs per page
    #[arg(short = 'n', long = "per-page", value_name = "N")]
    pub per_page: Option<u32>,

    /// Page to fetch, overriding any ?page= in PATH
    #[arg(short = 'p', long, value_name = "N")]
    pub page: Option<u32>,

    /// Only resolve PATH, do not fetch
    #[arg(short = 'r', long = "resolve-only")]
    pub resolve_only: bool,

    /// Fetch the whole index instead of one page
    #[arg(short = 'a', long, conflicts_with = "page")]
    pub all: bool,

    /// Read index files from a local mirror directory
    #[arg(short = 'm', long, value_name = "DIR")]
    pub mirror: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging (-vv => everything)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode, results only
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet || self.json
    }

    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut NozomiConfig) {
        if let Some(domain) = &self.domain {
            config.domain = domain.clone();
        }
        if let Some(per_page) = self.per_page {
            config.entries_per_page = per_page;
        }
    }
}
