//! Contact-form field validation.
//!
//! Mirrors the patterns enforced at the boundary: `local@domain.tld` for
//! email, optional leading `+` followed by 10–15 digits for phone.

/// `local@domain.tld` — non-empty local and domain parts with no whitespace
/// or extra `@`, domain carrying a dot with non-empty segments around it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Optional leading `+`, then 10–15 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}
