//! Value normalization
//!
//! Raw values still carry their quoting and trailing-comma artifacts:
//! `"admin",` and `admin,` both mean `admin`.

use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// An integer field held something that is not a base-10 integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid integer: {source}")]
pub struct ConversionError {
    /// The normalized text that failed to convert
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

/// Strip surrounding whitespace, then either a pair of double quotes (plus
/// one optional trailing comma) or a single trailing comma.
pub fn normalize(raw: &str) -> String {
    let value = raw.trim();
    match unquote(value) {
        Some(inner) => inner.to_string(),
        None => value.strip_suffix(',').unwrap_or(value).trim_end().to_string(),
    }
}

/// [`normalize`], then parse as a base-10 integer.
pub fn normalize_int<T>(raw: &str) -> Result<T, ConversionError>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = normalize(raw);
    value
        .parse()
        .map_err(|source| ConversionError { value, source })
}

fn unquote(value: &str) -> Option<&str> {
    let body = value.strip_suffix(',').map_or(value, str::trim_end);
    body.strip_prefix('"')?.strip_suffix('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_values() {
        assert_eq!(normalize(r#""admin""#), "admin");
        assert_eq!(normalize(r#"  "admin",  "#), "admin");
        assert_eq!(normalize(r#""admin" ,"#), "admin");
        assert_eq!(normalize(r#""""#), "");
    }

    #[test]
    fn test_bare_values() {
        assert_eq!(normalize("git"), "git");
        assert_eq!(normalize("git,"), "git");
        assert_eq!(normalize("  443 , "), "443");
    }

    #[test]
    fn test_only_one_comma_is_stripped() {
        assert_eq!(normalize("a,,"), "a,");
        assert_eq!(normalize(r#""a,","#), "a,");
    }

    #[test]
    fn test_inner_quotes_survive() {
        assert_eq!(normalize(r#""say "hi"""#), r#"say "hi""#);
        assert_eq!(normalize(r#"""#), r#"""#);
        assert_eq!(normalize(r#""unterminated"#), r#""unterminated"#);
    }

    #[test]
    fn test_values_with_colons() {
        assert_eq!(
            normalize(r#""https://example.com:8443/x","#),
            "https://example.com:8443/x"
        );
    }

    #[test]
    fn test_normalize_int() {
        assert_eq!(normalize_int::<u16>("22022,"), Ok(22022));
        assert_eq!(normalize_int::<u16>(r#""443""#), Ok(443));
        assert_eq!(normalize_int::<i64>(" -7 "), Ok(-7));
    }

    #[test]
    fn test_normalize_int_failures() {
        let err = normalize_int::<u16>("ssh").unwrap_err();
        assert_eq!(err.value, "ssh");
        assert!(err.to_string().contains("'ssh'"));

        assert!(normalize_int::<u16>("70000").is_err());
        assert!(normalize_int::<u16>("").is_err());
    }
}
