//! Command-line entry point: load a language and print translations.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use talks_i18n::config::{
    LoaderSettings,
    SettingsOverrides,
};
use talks_i18n::{
    APP_NAME,
    LoadRequest,
    MessageHolder,
    Translator,
    VERSION,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "talks")]
#[command(version)]
#[command(about = "Load translation files with language fallback and print their keys")]
#[command(long_about = None)]
/// Command-line arguments.
struct Cli {
    /// Keys to print; every entry is printed when none are given
    #[arg(value_name = "KEY")]
    keys: Vec<String>,

    /// Language to load (e.g. de, en-US, base); detected from the system when omitted
    #[arg(short, long)]
    lang: Option<String>,

    /// Folder holding the language files, overriding `languagesRelPath`
    #[arg(short, long)]
    path: Option<String>,

    /// File stem, overriding `languagesFilename`
    #[arg(short, long)]
    filename: Option<String>,

    /// File extension, overriding `languagesFileExt`
    #[arg(short, long)]
    ext: Option<String>,

    /// Directory containing `.js-talks.json`
    #[arg(long, value_name = "DIR", default_value = ".")]
    project: PathBuf,
}

/// Loads the configured language and prints the requested keys.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("{} v{}", APP_NAME, VERSION);

    let overrides = SettingsOverrides {
        languages_rel_path: cli.path,
        languages_filename: cli.filename,
        languages_file_ext: cli.ext,
    };
    let settings = match LoaderSettings::from_project_dir(&cli.project, overrides) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let translator = Translator::from_settings(&settings);
    let mut request = LoadRequest::from_settings(&settings);
    if let Some(lang) = cli.lang {
        request = request.with_language(lang);
    }

    let holder = match translator.load(request).await {
        Ok(holder) => holder,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !holder.is_loaded() {
        tracing::error!("No translation file could be loaded");
        return ExitCode::FAILURE;
    }

    match print_entries(&holder, &cli.keys) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Writes the requested keys, or the whole table sorted by key.
fn print_entries(holder: &MessageHolder, keys: &[String]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();

    if keys.is_empty() {
        let table = holder.snapshot();
        let mut entries: Vec<_> = table.iter().collect();
        entries.sort_unstable();
        for (key, value) in entries {
            writeln!(out, "{key} = {value}")?;
        }
    } else {
        for key in keys {
            writeln!(out, "{}", holder.get_value(key))?;
        }
    }

    Ok(())
}
