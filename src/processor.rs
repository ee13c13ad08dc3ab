use serde_json::Value;

use crate::{
    amount::Amount,
    catalogue::Catalogue,
    diagnostic::{self, Diagnostic, Outcome},
    record::{self, FieldError},
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: Amount,
    /// Number of sale records folded into the total.
    pub counted: usize,
}

#[derive(Debug)]
struct Sale<'a> {
    product: &'a str,
    quantity: u64,
}

impl<'a> TryFrom<&'a Value> for Sale<'a> {
    type Error = FieldError;

    fn try_from(v: &'a Value) -> Result<Self, Self::Error> {
        Ok(Sale {
            product: record::text(v, "Product")?,
            quantity: record::quantity(v, "Quantity")?,
        })
    }
}

fn handle(sale: &Sale, catalogue: &Catalogue, summary: &mut Summary) -> Result<(), Diagnostic> {
    let price = catalogue
        .price(sale.product)
        .ok_or_else(|| Diagnostic::UnknownProduct(sale.product.to_owned()))?;
    summary.total = price
        .checked_mul(sale.quantity)
        .and_then(|line| summary.total.checked_add(line))
        .ok_or_else(|| Diagnostic::Overflow(sale.product.to_owned()))?;
    summary.counted += 1;
    Ok(())
}

/// Sums `price * quantity` over the sale records, in order. Records that are
/// malformed or name an unknown product are skipped with a diagnostic.
pub fn total(catalogue: &Catalogue, sales: &[Value]) -> Outcome<Summary> {
    let mut summary = Summary::default();
    let mut diagnostics = Vec::new();
    for v in sales {
        let res = Sale::try_from(v)
            .map_err(Diagnostic::InvalidSale)
            .and_then(|sale| handle(&sale, catalogue, &mut summary));
        if let Err(diagnostic) = res {
            diagnostic::report(diagnostic, &mut diagnostics);
        }
    }
    tracing::info!(
        records = sales.len(),
        counted = summary.counted,
        total = %summary.total,
        "sales aggregated"
    );
    Outcome::new(summary, diagnostics)
}
