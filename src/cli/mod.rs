use clap::Parser;

use crate::connector::adapter::GeminiConfig;
use crate::connector::api::ContainerConfig;

#[derive(Parser, Debug)]
#[command(name = "visualsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Gemini model to query (overrides GEMINI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Gemini API base URL (overrides GEMINI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Answer from canned data instead of calling Gemini
    #[arg(long)]
    pub mock: bool,

    /// Where to write diagnostic logs; the terminal itself is used by the UI
    #[arg(long, default_value = "~/.visualsearch/visualsearch.log")]
    pub log_file: String,
}

impl Cli {
    /// Merge flags over the provider settings read from the environment.
    pub fn container_config(&self, env: GeminiConfig) -> ContainerConfig {
        let mut gemini = env;
        if let Some(model) = &self.model {
            gemini = gemini.with_model(model);
        }
        if let Some(base_url) = &self.base_url {
            gemini = gemini.with_base_url(base_url);
        }
        ContainerConfig {
            mock: self.mock,
            gemini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "visualsearch",
            "--model",
            "gemini-flag",
            "--base-url",
            "http://localhost:1",
        ])
        .unwrap();
        let env = GeminiConfig::default()
            .with_api_key("secret")
            .with_model("gemini-env");

        let config = cli.container_config(env);

        assert!(!config.mock);
        assert_eq!(config.gemini.model, "gemini-flag");
        assert_eq!(config.gemini.base_url, "http://localhost:1");
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn environment_is_kept_without_flags() {
        let cli = Cli::try_parse_from(["visualsearch", "--mock"]).unwrap();
        let env = GeminiConfig::default().with_model("gemini-env");

        let config = cli.container_config(env);

        assert!(config.mock);
        assert_eq!(config.gemini.model, "gemini-env");
        assert_eq!(cli.log_file, "~/.visualsearch/visualsearch.log");
    }

    #[test]
    fn subcommands_are_rejected() {
        let res = Cli::try_parse_from(["visualsearch", "search", "cats"]);
        assert!(res.is_err(), "the TUI is the only surface");
    }
}
