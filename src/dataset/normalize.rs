/// Variable attribute that holds identifiers in containers written with the
/// attribute index layout.
pub const ROWNAMES_ATTRIBUTE: &str = "rownames";

/// Name given to the identifier attribute once it has been moved back into
/// the identifier slot.
pub const FEATURE_ID_ATTRIBUTE: &str = "gene_ids";

/// Normalize an attribute name: trim, lowercase, then replace spaces and periods with `_`.
///
/// ```
/// use scconvert::dataset::normalize_attribute_name;
///
/// assert_eq!(normalize_attribute_name(" Source.Name "), "source_name");
/// assert_eq!(normalize_attribute_name("source_name"), "source_name");
/// ```
pub fn normalize_attribute_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '.' { '_' } else { c })
        .collect()
}

/// True when `names` is exactly `"0"`, `"1"`, ... in order.
pub(crate) fn is_positional(names: &[String]) -> bool {
    names
        .iter()
        .enumerate()
        .all(|(i, name)| *name == i.to_string())
}

/// Positional identifiers `"0"..n`.
pub(crate) fn positional_names(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_attribute_name() {
        assert_eq!(normalize_attribute_name("Source.Name"), "source_name");
        assert_eq!(normalize_attribute_name("  Cell Type  "), "cell_type");
        assert_eq!(normalize_attribute_name("n.Genes Detected"), "n_genes_detected");
        assert_eq!(normalize_attribute_name(""), "");
    }

    #[test]
    fn test_positional_names() {
        assert!(is_positional(&positional_names(12)));
        assert!(is_positional(&[]));
        assert!(!is_positional(&["0".to_string(), "2".to_string()]));
        assert!(!is_positional(&["00".to_string()]));
        assert!(!is_positional(&["GeneA".to_string()]));
    }
}
