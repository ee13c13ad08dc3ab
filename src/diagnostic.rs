/**
 * Recovered errors. A diagnostic is reported to the user and the run goes on.
 */
use crate::{json_file::LoadError, record::FieldError};

#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Invalid product entry skipped: {0}")]
    InvalidProduct(FieldError),
    #[error("Invalid sale record skipped: {0}")]
    InvalidSale(FieldError),
    #[error("Product not found in catalogue: {0}")]
    UnknownProduct(String),
    #[error("Sale record skipped, amount out of range: {0}")]
    Overflow(String),
}

/// A computed value together with the diagnostics raised while computing it,
/// in the order they were raised.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Outcome { value, diagnostics }
    }

    #[cfg(test)]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

pub(crate) fn report(diagnostic: Diagnostic, diagnostics: &mut Vec<Diagnostic>) {
    tracing::warn!(%diagnostic, "skipped");
    diagnostics.push(diagnostic);
}
