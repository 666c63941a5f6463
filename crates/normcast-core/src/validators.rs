//! Validator factories for common field shapes
//!
//! Each factory returns a stateless predicate usable with
//! [`NormalizerOptions::with_validator`](crate::options::NormalizerOptions::with_validator)
//! or entirely on its own. All four reject non-string values.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Rules for [`create_password_validator`]
#[derive(Debug, Clone, Copy)]
pub struct PasswordRules {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_number: bool,
    pub require_symbol: bool,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_number: true,
            require_symbol: true,
        }
    }
}

/// Build a password predicate: minimum length plus required character
/// classes. A symbol is any character outside `[a-zA-Z0-9]`.
pub fn create_password_validator(
    rules: PasswordRules,
) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value: &Value| {
        let Some(s) = value.as_str() else {
            return false;
        };
        if s.chars().count() < rules.min_length {
            return false;
        }
        if rules.require_uppercase && !s.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }
        if rules.require_number && !s.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        if rules.require_symbol && !s.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return false;
        }
        true
    }
}

/// Build an email predicate over the fixed `local@domain.tld` shape
pub fn create_email_validator() -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    |value: &Value| value.as_str().is_some_and(|s| EMAIL_RE.is_match(s))
}

/// Rules for [`create_username_validator`]
#[derive(Debug, Clone, Copy)]
pub struct UsernameRules {
    pub min_length: usize,
    pub max_length: usize,
    pub allow_underscore: bool,
    pub allow_digits: bool,
}

impl Default for UsernameRules {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 30,
            allow_underscore: true,
            allow_digits: true,
        }
    }
}

/// Build a username predicate: length bounds plus a character class of
/// letters with optional underscore and digits
pub fn create_username_validator(
    rules: UsernameRules,
) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let pattern = format!(
        "^[a-zA-Z{}{}]+$",
        if rules.allow_underscore { "_" } else { "" },
        if rules.allow_digits { "0-9" } else { "" },
    );
    let class = Regex::new(&pattern).expect("valid username pattern");

    move |value: &Value| {
        let Some(s) = value.as_str() else {
            return false;
        };
        let length = s.chars().count();
        if length < rules.min_length || length > rules.max_length {
            return false;
        }
        class.is_match(s)
    }
}

/// Rules for [`create_phone_validator`]
#[derive(Debug, Clone, Copy)]
pub struct PhoneRules {
    pub allow_plus_prefix: bool,
    pub min_digits: usize,
    pub max_digits: usize,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            allow_plus_prefix: true,
            min_digits: 9,
            max_digits: 15,
        }
    }
}

/// Build a phone predicate: an optional leading `+` followed by a digit
/// run within bounds
pub fn create_phone_validator(
    rules: PhoneRules,
) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let pattern = if rules.allow_plus_prefix {
        format!(r"^\+?[0-9]{{{},{}}}$", rules.min_digits, rules.max_digits)
    } else {
        format!(r"^[0-9]{{{},{}}}$", rules.min_digits, rules.max_digits)
    };
    let run = Regex::new(&pattern).expect("valid phone pattern");

    move |value: &Value| value.as_str().is_some_and(|s| run.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_defaults() {
        let validator = create_password_validator(PasswordRules::default());
        assert!(!validator(&json!("abc")));
        assert!(!validator(&json!("lowercaseonly")));
        assert!(validator(&json!("Strong1!")));
        assert!(!validator(&json!(12345678)));
    }

    #[test]
    fn test_password_custom_rules() {
        let strict = create_password_validator(PasswordRules {
            min_length: 12,
            ..PasswordRules::default()
        });
        assert!(!strict(&json!("Strong1!")));
        assert!(strict(&json!("Stronger123!")));

        let relaxed = create_password_validator(PasswordRules {
            require_symbol: false,
            ..PasswordRules::default()
        });
        assert!(relaxed(&json!("Strong123")));
    }

    #[test]
    fn test_email() {
        let validator = create_email_validator();
        assert!(validator(&json!("test@example.com")));
        assert!(!validator(&json!("not-an-email")));
        assert!(!validator(&json!("two@at@signs.com")));
        assert!(!validator(&json!(null)));
    }

    #[test]
    fn test_username_defaults() {
        let validator = create_username_validator(UsernameRules::default());
        assert!(validator(&json!("john_doe42")));
        assert!(!validator(&json!("ab")));
        assert!(!validator(&json!("has spaces")));
    }

    #[test]
    fn test_username_without_digits() {
        let validator = create_username_validator(UsernameRules {
            allow_digits: false,
            ..UsernameRules::default()
        });
        assert!(validator(&json!("johndoe")));
        assert!(!validator(&json!("john42")));
    }

    #[test]
    fn test_phone() {
        let validator = create_phone_validator(PhoneRules::default());
        assert!(validator(&json!("+250788123456")));
        assert!(validator(&json!("0788123456")));
        assert!(!validator(&json!("12345")));
        assert!(!validator(&json!("call-me")));

        let no_plus = create_phone_validator(PhoneRules {
            allow_plus_prefix: false,
            ..PhoneRules::default()
        });
        assert!(!no_plus(&json!("+250788123456")));
    }
}
