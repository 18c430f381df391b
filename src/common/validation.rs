use super::FieldErrors;

/// Longest address any form accepts, in characters.
pub const EMAIL_MAX_LEN: usize = 255;

/// Email validation
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.chars().count() > EMAIL_MAX_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    // Domain must have at least one dot, and not at either end
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    (value.starts_with("https://") || value.starts_with("http://"))
        && value.len() > "https://".len()
}

/// Records "`label` is required" when `value` is blank.
pub fn require(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
        return false;
    }
    true
}

pub fn max_chars(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.insert(field, format!("{label} must be at most {max} characters"));
    }
}
