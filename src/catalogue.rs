use serde_json::Value;
use std::{collections::BTreeMap, path::Path};

use crate::{
    amount::Amount,
    diagnostic::{self, Diagnostic, Outcome},
    json_file,
    record::{self, FieldError},
};

/// Unit prices keyed by product title.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Catalogue(BTreeMap<String, Amount>);

struct ProductEntry<'a> {
    title: &'a str,
    price: Amount,
}

impl<'a> TryFrom<&'a Value> for ProductEntry<'a> {
    type Error = FieldError;

    fn try_from(v: &'a Value) -> Result<Self, Self::Error> {
        Ok(ProductEntry {
            title: record::text(v, "title")?,
            price: record::price(v, "price")?,
        })
    }
}

impl Catalogue {
    pub fn price(&self, title: &str) -> Option<Amount> {
        self.0.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Later duplicates of a title replace earlier ones.
    pub fn insert(&mut self, title: impl Into<String>, price: Amount) {
        let title = title.into();
        if let Some(previous) = self.0.insert(title.clone(), price) {
            tracing::debug!(%title, %previous, %price, "duplicate title, price replaced");
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Amount)> for Catalogue {
    fn from_iter<I: IntoIterator<Item = (S, Amount)>>(iter: I) -> Self {
        let mut catalogue = Catalogue::default();
        for (title, price) in iter {
            catalogue.insert(title, price);
        }
        catalogue
    }
}

/// Builds a catalogue from product records, skipping the invalid ones.
pub fn from_records(records: &[Value]) -> Outcome<Catalogue> {
    let mut diagnostics = Vec::new();
    let catalogue = records
        .iter()
        .map(ProductEntry::try_from)
        .filter_map(|res_entry| {
            res_entry
                .map_err(|err| {
                    diagnostic::report(Diagnostic::InvalidProduct(err), &mut diagnostics)
                })
                .ok()
        })
        .map(|entry| (entry.title, entry.price))
        .collect();
    Outcome::new(catalogue, diagnostics)
}

/// Loads the catalogue file. An unreadable or malformed file yields an empty
/// catalogue.
pub fn load(path: &Path) -> Outcome<Catalogue> {
    match json_file::read_array(path) {
        Ok(records) => {
            let outcome = from_records(&records);
            tracing::info!(
                path = %path.display(),
                records = records.len(),
                products = outcome.value.len(),
                "catalogue loaded"
            );
            outcome
        }
        Err(err) => {
            let mut diagnostics = Vec::new();
            diagnostic::report(err.into(), &mut diagnostics);
            Outcome::new(Catalogue::default(), diagnostics)
        }
    }
}
