//! `imgfetch config`: print the config path and effective values.

use anyhow::Result;
use imgfetch_core::config::{self, FetchConfig};

pub fn run_show_config(cfg: &FetchConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
