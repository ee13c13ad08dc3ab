use serde_json::Value;
use std::path::Path;

use crate::{
    diagnostic::{self, Outcome},
    json_file,
};

/// Loads the sale records verbatim. Validation happens during aggregation.
pub fn load(path: &Path) -> Outcome<Vec<Value>> {
    match json_file::read_array(path) {
        Ok(records) => {
            tracing::info!(path = %path.display(), records = records.len(), "sales loaded");
            Outcome::new(records, Vec::new())
        }
        Err(err) => {
            let mut diagnostics = Vec::new();
            diagnostic::report(err.into(), &mut diagnostics);
            Outcome::new(Vec::new(), diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_file::tests::{fixture, fixture_dir};
    use serde_json::json;

    #[test]
    fn records_are_untouched() {
        let path = fixture(
            "sales.json",
            r#"[{"SALE_ID": 1, "Product": "Widget", "Quantity": 3}, {"Quantity": -1}]"#,
        );
        let outcome = load(&path);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(
            outcome.value,
            vec![
                json!({"SALE_ID": 1, "Product": "Widget", "Quantity": 3}),
                json!({"Quantity": -1}),
            ]
        );
    }

    #[test]
    fn malformed_file() {
        let path = fixture("sales-malformed.json", "[{\"Product\": }]");
        let outcome = load(&path);
        assert!(outcome.value.is_empty());
        assert_eq!(
            outcome.messages(),
            vec![format!("Error: Invalid JSON format in '{}'.", path.display())]
        );
    }

    #[test]
    fn top_level_must_be_an_array() {
        let path = fixture("sales-object.json", r#"{"Product": "Widget", "Quantity": 3}"#);
        let outcome = load(&path);
        assert!(outcome.value.is_empty());
        assert_eq!(
            outcome.messages(),
            vec![format!("Error: Expected a JSON array in '{}'.", path.display())]
        );
    }

    #[test]
    fn unreadable_file() {
        let path = fixture_dir("sales-unreadable.json");
        let outcome = load(&path);
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.messages()[0]
            .starts_with(&format!("Error: Could not read '{}': ", path.display())));
    }
}
