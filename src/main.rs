//! Entry point for `i18n-extract`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    ArgAction,
    Parser,
};
use template_i18n::config::ConfigManager;
use template_i18n::extract::{
    self,
    ExtractError,
};
use tracing_subscriber::EnvFilter;

/// Collects translation keys from templates and writes a language file skeleton
#[derive(Parser, Debug)]
#[command(name = "i18n-extract", version)]
struct Args {
    /// Template base directory
    #[arg(long)]
    fs_base: PathBuf,

    /// Existing languages file [default: languages.yaml]
    #[arg(long)]
    languages: Option<PathBuf>,

    /// Language that receives every key [default: en]
    #[arg(long)]
    fallback: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries the generated document
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ExtractError> {
    let base = std::path::absolute(&args.fs_base)?;

    let mut config = ConfigManager::new();
    config.load_settings(Some(base.clone()))?;

    let mut settings = config.get_settings().clone();
    if let Some(languages) = &args.languages {
        settings.languages_file = std::path::absolute(languages)?.to_string_lossy().into_owned();
    }
    if let Some(fallback) = &args.fallback {
        settings.fallback_language.clone_from(fallback);
    }
    config.update_settings(settings)?;

    let skeleton = extract::extract(&base, &config)?;
    for (language, missing) in skeleton.untranslated() {
        if missing > 0 {
            tracing::info!(language, missing, "Untranslated keys");
        }
    }

    let yaml = skeleton.to_yaml()?;
    match &args.output {
        Some(path) => std::fs::write(path, yaml)?,
        None => std::io::stdout().lock().write_all(yaml.as_bytes())?,
    }

    Ok(())
}
