//! Name normalization for exact and fuzzy comparison.

/// Trimmed form of a candidate name. Exact matching compares this.
#[must_use]
pub fn canonical(name: &str) -> &str {
    name.trim()
}

/// Key used for fuzzy matching: lowercase, with whitespace and punctuation
/// removed. `"V4046 Sgr"`, `"v4046sgr"` and `"V4046-SGR"` share a key.
#[must_use]
pub fn fuzzy_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_trims_outer_whitespace_only() {
        assert_eq!(canonical("  V4046 Sgr \t"), "V4046 Sgr");
    }

    #[test]
    fn fuzzy_key_ignores_case_spacing_and_punctuation() {
        assert_eq!(fuzzy_key("V4046 Sgr"), "v4046sgr");
        assert_eq!(fuzzy_key("v4046-SGR"), "v4046sgr");
        assert_eq!(fuzzy_key("2MASS J0523-1403"), fuzzy_key("2mass_j05231403"));
    }

    #[test]
    fn fuzzy_key_keeps_digits_apart_from_letters() {
        assert!(fuzzy_key("TWA 27") != fuzzy_key("TWA 2 7b"));
    }
}
