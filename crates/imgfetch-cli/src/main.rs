use imgfetch_core::logging;

mod cli;

use crate::cli::CliCommand;

fn setup_logging() {
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, logging to stderr: {:#}", err);
    }
}

#[tokio::main]
async fn main() {
    setup_logging();

    // URL failures are reported per URL; only setup errors reach here.
    if let Err(err) = CliCommand::run_from_args().await {
        tracing::error!("{:#}", err);
        eprintln!("imgfetch error: {:#}", err);
        std::process::exit(1);
    }
}
