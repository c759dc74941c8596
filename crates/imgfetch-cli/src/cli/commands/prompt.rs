//! `imgfetch prompt`: the interactive loop. Reads URLs until `done` or EOF.

use anyhow::{Context, Result};
use imgfetch_core::config::FetchConfig;
use std::io::{self, BufRead, Write};

use super::run_fetch;

const PROMPT: &str = "Please enter an image URL: ";

pub async fn run_prompt(cfg: FetchConfig) -> Result<()> {
    println!("Welcome to the imgfetch image fetcher");
    println!("A tool for mindfully collecting images from the web\n");
    println!("Enter image URLs one by one. Type 'done' to finish.\n");

    let urls = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        collect_urls(stdin.lock(), stdout.lock())?
    };

    if urls.is_empty() {
        println!("No URLs entered. Exiting.");
        return Ok(());
    }
    run_fetch(cfg, urls).await
}

/// Prompts on `output` and reads one URL per line from `input` until a line
/// equal to `done` (any case) or end of input. Blank lines are ignored.
pub(crate) fn collect_urls<R: BufRead, W: Write>(input: R, mut output: W) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("read URL from input")?;
        let url = line.trim();
        if url.eq_ignore_ascii_case("done") {
            break;
        }
        if !url.is_empty() {
            urls.push(url.to_string());
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    Ok(urls)
}
