/**
 * Computes the total sales amount from a product price catalogue and a file of sale records,
 * both JSON. Diagnostics and the report go to stdout; the report is also written to
 * `SalesResults.txt`. Logs go to stderr and are filtered with `RUST_LOG`.
 */
mod amount;
mod catalogue;
mod cli;
mod diagnostic;
mod json_file;
mod processor;
mod record;
mod report;
mod sales;

use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = match cli::parse_args(std::env::args_os(), std::io::stdout()) {
        Ok(args) => args,
        Err(code) => std::process::exit(code),
    };

    cli::run(&args, std::io::stdout().lock())?;
    Ok(())
}
