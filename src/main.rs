use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eyre::{Result, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytt.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytt")
        .join("logs")
}

/// Accept either a bare 11-character video ID or any supported URL shape.
fn resolve_input(input: &str) -> ytt::Result<String> {
    let bare_id = regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap();
    if bare_id.is_match(input) {
        return Ok(input.to_string());
    }
    ytt::video_id::parse_video_id(input)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid); CLI flags take priority
    let config = ytt::config::Config::load().unwrap_or_default();

    let langs = if !cli.langs.is_empty() {
        cli.langs.clone()
    } else if let Some(ref default_langs) = config.default_langs {
        debug!("Config default_langs: {default_langs:?}");
        default_langs.clone()
    } else {
        vec!["en".to_string()]
    };

    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok())
        })
        .unwrap_or(OutputFormat::Text);

    let fetcher = ytt::Fetcher::default();

    // Collect inputs: from arg or stdin
    let inputs = if let Some(ref input) = cli.input {
        vec![input.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if inputs.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: ytt <URL>\n       echo <URL> | ytt");
    }

    for input in &inputs {
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let video_id = resolve_input(input)?;
        debug!("Resolved video id: {video_id}");

        let snippets = ytt::get_transcript_from_video_id(&fetcher, &video_id, &langs).await?;

        if cli.verbose {
            eprintln!("Video: {video_id}\nSnippets: {}", snippets.len());
        }

        let rendered = match format {
            OutputFormat::Text => ytt::output::render_text(&snippets),
            OutputFormat::Json => ytt::output::render_json(&snippets)?,
            OutputFormat::Srt => ytt::output::render_srt(&snippets),
        };

        if let Some(ref path) = cli.output {
            std::fs::write(path, &rendered)?;
            if cli.verbose {
                eprintln!("Output written to: {}", path.display());
            }
        } else {
            println!("{rendered}");
        }
    }

    Ok(())
}
