//! Domain name normalization
//!
//! Mapping domains are stored in a canonical form so that a lookup by an
//! email's domain part is a plain equality check.

use std::fmt;

use crate::error::{DriveError, DriveResult};

const STRIPPED_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

/// Canonical form of a domain or URL-ish input.
///
/// Lowercases, strips any leading `http://`, `https://` and `www.` (repeatedly,
/// so the result is a fixed point), then drops everything from the first `/`.
pub fn normalize_domain(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut rest = lowered.as_str();

    loop {
        rest = rest.trim_start();
        match STRIPPED_PREFIXES
            .iter()
            .find_map(|prefix| rest.strip_prefix(*prefix))
        {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }

    let host = rest.split('/').next().unwrap_or_default();
    host.trim_end().to_string()
}

/// A normalized, non-empty mapping domain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    pub fn parse(raw: &str) -> DriveResult<Self> {
        let normalized = normalize_domain(raw);
        if normalized.is_empty() {
            return Err(DriveError::Validation("Domain is required".to_string()));
        }
        Ok(Self(normalized))
    }

    /// Wrap a value read back from storage
    pub fn from_db(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_input() {
        assert_eq!(normalize_domain("HTTPS://WWW.Example.com/path"), "example.com");
        assert_eq!(normalize_domain("http://corp.example.org"), "corp.example.org");
        assert_eq!(normalize_domain("www.example.com/a/b?c=d"), "example.com");
        assert_eq!(normalize_domain("Example.COM"), "example.com");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "HTTPS://WWW.Example.com/path",
            "www.www.example.com",
            "http://https://example.com",
            "  www. example.com /x",
            "example.com",
            "",
            "/",
        ];
        for input in inputs {
            let once = normalize_domain(input);
            assert_eq!(normalize_domain(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(DomainName::parse("").is_err());
        assert!(DomainName::parse("https://www./").is_err());
        assert_eq!(DomainName::parse("WWW.a.io").unwrap().as_str(), "a.io");
    }
}
