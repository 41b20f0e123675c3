//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check: local@domain.tld without whitespace
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Check if an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logging (e.g., us**@example.com)
///
/// Keeps the first two characters of the local part and the full domain so
/// log lines stay correlatable without exposing the whole address.
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            let hidden = local.chars().count().saturating_sub(2).max(2);
            format!("{}{}@{}", visible, "*".repeat(hidden), domain)
        }
        _ => "****".to_string(),
    }
}

/// Split a comma-separated address list, dropping empty entries
pub fn split_address_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user example@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("user@example.com"), "us**@example.com");
        assert_eq!(mask_email("alexander@example.com"), "al*******@example.com");
        assert_eq!(mask_email("a@example.com"), "a**@example.com");
        assert_eq!(mask_email("not-an-email"), "****");
        assert_eq!(mask_email("@example.com"), "****");
    }

    #[test]
    fn test_split_address_list() {
        assert_eq!(
            split_address_list("a@example.com, b@example.com,,  "),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
        assert!(split_address_list("").is_empty());
    }
}
