use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Srt,
}

#[derive(Parser)]
#[command(name = "ytt", about = "YouTube caption transcript extractor", version)]
pub struct Cli {
    /// YouTube video URL or 11-character video ID (reads from stdin if omitted)
    pub input: Option<String>,

    /// Preferred caption language, repeatable in priority order (default: en)
    #[arg(short, long = "lang", value_name = "CODE")]
    pub langs: Vec<String>,

    /// Output format: text (default), json, srt
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show resolved video ID and snippet count on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
