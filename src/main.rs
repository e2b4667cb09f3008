use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use visualsearch::cli::Cli;
use visualsearch::{Container, GeminiConfig, TuiApp};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = PathBuf::from(expand_tilde(&cli.log_file));
    init_logging(&log_path, cli.verbose)?;

    let container = Container::new(cli.container_config(GeminiConfig::from_env()));
    info!(
        "Starting visualsearch (model={}, mock={})",
        container.model_name(),
        container.is_mock()
    );

    TuiApp::new(container.search_use_case()).run().await
}

fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = open_log_file(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn open_log_file_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("visualsearch.log");

        open_log_file(&path).expect("open log file");

        assert!(path.exists());
    }

    #[test]
    fn expand_tilde_leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/var/log/vs.log"), "/var/log/vs.log");
        assert_eq!(expand_tilde("logs/~vs.log"), "logs/~vs.log");
    }
}
