//! `imgfetch fetch <URL>...`: run the pipeline and print one line per URL.

use anyhow::{Context, Result};
use imgfetch_core::config::FetchConfig;
use imgfetch_core::control::RunControl;
use imgfetch_core::scheduler::{self, FetchRun};
use std::sync::Arc;

const SIGN_OFF: &str = "Connection strengthened. Community enriched.";

pub async fn run_fetch(cfg: FetchConfig, urls: Vec<String>) -> Result<()> {
    let control = RunControl::new();

    // Ctrl-C aborts the run: no new URLs start, in-flight transfers stop.
    let ctrl_c = {
        let control = control.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, aborting run");
                control.request_abort();
            }
        })
    };

    println!(
        "Fetching {} URL(s) into {} ...",
        urls.len(),
        cfg.output_directory.display()
    );
    let cfg = Arc::new(cfg);
    let run = tokio::task::spawn_blocking({
        let control = control.clone();
        move || scheduler::fetch_all(cfg, urls, &control)
    })
    .await
    .context("fetch task join")?;
    ctrl_c.abort();

    print_run(&run);
    Ok(())
}

fn print_run(run: &FetchRun) {
    for report in &run.reports {
        println!("{}", report);
    }
    println!();
    println!("{}", run.summary);
    println!("{}", SIGN_OFF);
}
