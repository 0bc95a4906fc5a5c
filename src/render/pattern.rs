//! `{token}` substitution for output-path patterns and fixup replacements.
//!
//! Tokens take the form `{field}` or `{field.func}` where `func` is
//! `lower` or `trim`. Unknown fields are an error; unknown functions are
//! ignored.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{.+?\}").expect("token regex"));

/// The token values available to one merge
pub type MergeValues<'a> = BTreeMap<&'a str, String>;

/// Substitute every `{token}` in the pattern from the supplied values.
pub fn merge(pattern: &str, values: &MergeValues<'_>) -> Result<String> {
    let mut merged = pattern.to_string();

    for token in TOKEN_RE.find_iter(pattern) {
        let inner = &token.as_str()[1..token.as_str().len() - 1];
        let (field, func) = match inner.split_once('.') {
            Some((field, func)) => (field, Some(func)),
            None => (inner, None),
        };

        let value = values
            .get(field)
            .ok_or_else(|| Error::UnknownMergeField(field.to_string()))?;

        let value = match func {
            Some("lower") => value.to_lowercase(),
            Some("trim") => value.trim().to_string(),
            _ => value.clone(),
        };

        merged = merged.replace(token.as_str(), &value);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> MergeValues<'static> {
        let mut v = MergeValues::new();
        v.insert("category", "Utilities".to_string());
        v.insert("method", " Ping ".to_string());
        v
    }

    #[test]
    fn test_plain_token() {
        assert_eq!(
            merge("src/{category}Client.cs", &values()).unwrap(),
            "src/UtilitiesClient.cs"
        );
    }

    #[test]
    fn test_lower_and_trim_functions() {
        assert_eq!(
            merge("lib/{category.lower}.php", &values()).unwrap(),
            "lib/utilities.php"
        );
        assert_eq!(merge("{method.trim}.cs", &values()).unwrap(), "Ping.cs");
    }

    #[test]
    fn test_unknown_function_is_ignored() {
        assert_eq!(
            merge("{category.shout}", &values()).unwrap(),
            "Utilities"
        );
    }

    #[test]
    fn test_unknown_field_is_error() {
        match merge("{planet}.cs", &values()).unwrap_err() {
            Error::UnknownMergeField(field) => assert_eq!(field, "planet"),
            other => panic!("Expected UnknownMergeField, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_without_tokens_is_unchanged() {
        assert_eq!(
            merge("src/ApiClient.cs", &values()).unwrap(),
            "src/ApiClient.cs"
        );
    }
}
