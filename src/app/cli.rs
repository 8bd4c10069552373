use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Map documentation files to their detected natural language"
)]
pub struct Cli {
    /// Path to the JSON run configuration. Falls back to ./doclang.json,
    /// then ~/.config/doclang/config.json
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}
