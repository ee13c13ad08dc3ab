use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::Path,
    time::Duration,
};

use crate::amount::Amount;

pub const DEFAULT_PATH: &str = "SalesResults.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub total: Amount,
    pub elapsed: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sales Results")?;
        writeln!(f, "----------------------------")?;
        writeln!(f, "Total sales amount: ${:.2}", self.total)?;
        writeln!(
            f,
            "Execution time: {:.6} seconds",
            self.elapsed.as_secs_f64()
        )
    }
}

impl Report {
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }

    /// Creates or truncates the file at `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        self.write_to(File::create(path)?)
    }
}
