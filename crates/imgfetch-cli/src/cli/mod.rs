//! CLI for the imgfetch image fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imgfetch_core::config::{self, FetchConfig};
use std::path::PathBuf;

use commands::{run_fetch, run_prompt, run_show_config};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: mindfully collect images from the web", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the given image URLs.
    Fetch {
        /// HTTP/HTTPS image URLs, processed in order.
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Prompt for image URLs one by one (type `done` to finish), then fetch them.
    Prompt {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

/// Flags that override values from `config.toml` for one run.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Fetch up to N URLs concurrently.
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,
    /// Directory to save images into.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Largest accepted image, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,
    /// User-Agent header sent with every request.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ConfigOverrides {
    /// Applies the flags that were given on top of `cfg`.
    pub fn apply(&self, mut cfg: FetchConfig) -> Result<FetchConfig> {
        if let Some(jobs) = self.jobs {
            cfg.workers = jobs;
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_directory = dir.clone();
        }
        if let Some(max) = self.max_size {
            cfg.max_file_size_bytes = max;
        }
        if let Some(ua) = &self.user_agent {
            cfg.user_agent = ua.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch { urls, overrides } => {
                run_fetch(overrides.apply(cfg)?, urls).await?;
            }
            CliCommand::Prompt { overrides } => run_prompt(overrides.apply(cfg)?).await?,
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
