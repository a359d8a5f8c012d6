//! Contact address canonicalization.
//!
//! Stored phone numbers arrive in whatever shape the user typed. Providers
//! require E.164-style addresses, so every sender canonicalizes before the
//! request goes out.

/// Strip whitespace and ensure a country-code prefix.
///
/// Numbers that already carry a `+` prefix are trusted as-is (minus spaces);
/// anything else gets the configured default country code prepended.
pub fn canonicalize(raw: &str, default_country_code: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.starts_with('+') {
        compact
    } else {
        format!("{default_country_code}{compact}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_country_code() {
        assert_eq!(canonicalize("9876543210", "+91"), "+919876543210");
    }

    #[test]
    fn test_strips_spaces() {
        assert_eq!(canonicalize("98765 43210", "+91"), "+919876543210");
        assert_eq!(canonicalize(" +91 98765 43210 ", "+91"), "+919876543210");
    }

    #[test]
    fn test_keeps_existing_prefix() {
        assert_eq!(canonicalize("+14155238886", "+91"), "+14155238886");
    }
}
