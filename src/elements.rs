//! Element set loading.
//!
//! The quiz ships with a small built-in set and can load a custom one from a
//! JSON file given on the command line. Loading is content input only; miss
//! counts and scores never leave the process.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::Element;

/// The built-in study set.
pub fn default_set() -> Vec<Element> {
    vec![
        Element::new("Carbon", "C", 6),
        Element::new("Gold", "Au", 79),
        Element::new("Chlorine", "Cl", 17),
        Element::new("Sodium", "Na", 11),
    ]
}

/// Load a custom element set from a JSON file.
///
/// Format: `[{"name": "Carbon", "symbol": "C", "atomic_number": 6}, ...]`
pub fn load_set(path: &Path) -> Result<Vec<Element>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read element file: {:?}", path))?;
    parse_set(&json).with_context(|| format!("Invalid element file: {:?}", path))
}

fn parse_set(json: &str) -> Result<Vec<Element>> {
    let mut elements: Vec<Element> =
        serde_json::from_str(json).context("Failed to parse element JSON")?;

    if elements.is_empty() {
        bail!("element set is empty");
    }

    // Names double as answers, so duplicates would make grading ambiguous.
    let mut seen = HashSet::new();
    for element in &elements {
        if !seen.insert(element.name.to_lowercase()) {
            bail!("duplicate element name: {}", element.name);
        }
    }

    // Ignore any miss counts smuggled in through the file.
    for element in &mut elements {
        element.misses = 0;
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_custom_set() {
        let json = r#"[
            {"name": "Helium", "symbol": "He", "atomic_number": 2},
            {"name": "Neon", "symbol": "Ne", "atomic_number": 10, "misses": 9}
        ]"#;
        let elements = parse_set(json).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].symbol, "He");
        // Miss counts from the file are discarded.
        assert_eq!(elements[1].misses, 0);
    }

    #[test]
    fn rejects_empty_set() {
        assert!(parse_set("[]").is_err());
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let json = r#"[
            {"name": "Gold", "symbol": "Au", "atomic_number": 79},
            {"name": "gold", "symbol": "Au", "atomic_number": 79}
        ]"#;
        assert!(parse_set(json).is_err());
    }

    #[test]
    fn default_set_is_valid() {
        let set = default_set();
        assert_eq!(set.len(), 4);
        assert_eq!(set[0].name, "Carbon");
    }
}
