use serde_json::{error::Category, Value};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Error: File '{}' not found.", .path.display())]
    NotFound { path: PathBuf },
    #[error("Error: Could not read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Error: Invalid JSON format in '{}'.", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error: Expected a JSON array in '{}'.", .path.display())]
    NotAnArray { path: PathBuf },
}

/// Reads a file holding a top-level JSON array. The file is closed before
/// returning.
pub fn read_array(path: &Path) -> Result<Vec<Value>, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_owned(),
        },
        _ => LoadError::Io {
            path: path.to_owned(),
            source,
        },
    })?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| match source.classify() {
            Category::Io => LoadError::Io {
                path: path.to_owned(),
                source: source.into(),
            },
            _ => LoadError::Json {
                path: path.to_owned(),
                source,
            },
        })?;
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(LoadError::NotAnArray {
            path: path.to_owned(),
        }),
    }
}
