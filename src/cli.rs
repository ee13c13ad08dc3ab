/**
 * The CLI interface for the sales calculator.
 *
 * Loading the input files continues despite missing files, malformed JSON and invalid entries:
 * each is reported as a diagnostic on the output and skipped. The only fatal errors are failing
 * to write the output or the report file.
 */
use clap::{ErrorKind, Parser};
use std::{
    ffi::OsString,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use crate::{
    catalogue,
    diagnostic::Outcome,
    processor::{self, Summary},
    report::{self, Report},
    sales,
};

pub const USAGE: &str = "Usage: compute-sales priceCatalogue.json salesRecord.json";

// The io error is the source of each variant and is reported as its cause,
// so the messages leave it out.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not write to the output.")]
    Io(#[from] io::Error),
    #[error("Could not write report to '{}'.", .path.display())]
    Save { path: PathBuf, source: io::Error },
}

/// Computes total sales from a product price catalogue and sales records.
#[derive(Debug, Parser)]
#[clap(name = "compute-sales", version)]
pub struct Args {
    /// JSON array of products with `title` and `price`.
    #[clap(value_parser)]
    pub catalogue: PathBuf,
    /// JSON array of sales with `Product` and `Quantity`.
    #[clap(value_parser)]
    pub sales: PathBuf,
    /// Where the report is written. Existing content is replaced.
    #[clap(long, value_parser, default_value = report::DEFAULT_PATH)]
    pub output: PathBuf,
}

/// Parses the command line. `Err` holds the exit status when the program should stop: 0 after
/// help or version output, 1 after printing the usage line.
pub fn parse_args<I, T, W>(itr: I, mut out: W) -> Result<Args, i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    match Args::try_parse_from(itr) {
        Ok(args) => Ok(args),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(out, "{}", err);
            Err(0)
        }
        Err(err) => {
            tracing::debug!(%err, "invalid arguments");
            let _ = writeln!(out, "{}", USAGE);
            Err(1)
        }
    }
}

fn print_diagnostics<T, W: Write>(outcome: &Outcome<T>, out: &mut W) -> io::Result<()> {
    for diagnostic in &outcome.diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    Ok(())
}

pub fn run<W: Write>(args: &Args, mut out: W) -> Result<Summary, Error> {
    let start = Instant::now();

    let catalogue = catalogue::load(&args.catalogue);
    print_diagnostics(&catalogue, &mut out)?;
    if catalogue.value.is_empty() {
        tracing::warn!(path = %args.catalogue.display(), "catalogue is empty");
    }
    let sales = sales::load(&args.sales);
    print_diagnostics(&sales, &mut out)?;
    let summary = processor::total(&catalogue.value, &sales.value);
    print_diagnostics(&summary, &mut out)?;

    let report = Report {
        total: summary.value.total,
        elapsed: start.elapsed(),
    };
    writeln!(out)?;
    report.write_to(&mut out)?;
    report.save(&args.output).map_err(|source| Error::Save {
        path: args.output.clone(),
        source,
    })?;
    tracing::debug!(output = %args.output.display(), "report saved");
    Ok(summary.value)
}
