//! Format checks shared by signup, subscriptions, inquiries and gallery uploads.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?([a-z0-9-]+\.)+[a-z]{2,6}(:[0-9]{1,5})?(/.*)?$")
        .expect("url regex compiles")
});

/// Characters accepted as the "special" class of the password policy.
pub const PASSWORD_SPECIALS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url.trim())
}

/// Returns the first unmet password rule, if any.
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        return Some("Password must be at least 8 characters long.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password must contain at least one lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one digit.");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Some("Password must contain at least one special character.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("amy@x.com"));
        assert!(is_valid_email("first.last@studio.co.uk"));
        assert!(!is_valid_email("amy"));
        assert!(!is_valid_email("amy@x"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn url_shapes() {
        assert!(is_valid_url("https://cdn.example.com/ink/1.png"));
        assert!(is_valid_url("http://example.org"));
        assert!(is_valid_url("images.example.com:8080/a.jpg"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("ftp://example.com/file"));
    }

    #[test]
    fn password_policy() {
        assert_eq!(password_problem("Abcd123!"), None);
        assert!(password_problem("Ab1!").is_some());
        assert!(password_problem("abcd123!").is_some());
        assert!(password_problem("ABCD123!").is_some());
        assert!(password_problem("Abcdefg!").is_some());
        assert!(password_problem("Abcd1234").is_some());
    }
}
