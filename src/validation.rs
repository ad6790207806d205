//! Structural validators for book and borrower fields
//!
//! The pure checks mirror the registration rules: ISBN-10/13 checksum
//! integrity and a conservative person-name format. Blank input passes both
//! checks; requiredness is enforced separately on the request types.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z\s'\-]{1,48}[A-Za-z]$").unwrap());

/// Check ISBN-10/ISBN-13 checksum validity.
///
/// Whitespace and hyphens are stripped before checking. Blank input is
/// treated as valid: absence of the field is a requiredness concern, not a
/// format violation.
pub fn is_valid_isbn(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return true;
    }

    let isbn: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    match isbn.len() {
        10 => is_valid_isbn10(&isbn),
        13 => is_valid_isbn13(&isbn),
        _ => false,
    }
}

fn is_valid_isbn10(isbn: &[char]) -> bool {
    let mut sum = 0u32;
    for (i, c) in isbn[..9].iter().enumerate() {
        match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => sum += d * (10 - i as u32),
            _ => return false,
        }
    }

    // The check character may be 'X' (value 10)
    let check = match isbn[9] {
        'X' | 'x' => 10,
        c if c.is_ascii_digit() => c.to_digit(10).unwrap_or(0),
        _ => return false,
    };

    (sum + check) % 11 == 0
}

fn is_valid_isbn13(isbn: &[char]) -> bool {
    let mut sum = 0u32;
    for (i, c) in isbn[..12].iter().enumerate() {
        match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => sum += d * if i % 2 == 0 { 1 } else { 3 },
            _ => return false,
        }
    }

    let check = (10 - (sum % 10)) % 10;
    match isbn[12] {
        c if c.is_ascii_digit() => c.to_digit(10) == Some(check),
        _ => false,
    }
}

/// Check that a person name is plausibly formed.
///
/// The trimmed value must start and end with a letter, contain only
/// letters, spaces, hyphens and apostrophes in between, and be 3-50
/// characters long. Blank input passes for the same reason as ISBN.
pub fn is_valid_name(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return true;
    }
    NAME_PATTERN.is_match(raw.trim())
}

/// Field-level ISBN rule for `#[validate(custom)]`: required and well-formed.
pub fn isbn(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "must not be blank"));
    }
    if !is_valid_isbn(value) {
        return Err(field_error("isbn", "is not a valid ISBN-10 or ISBN-13"));
    }
    Ok(())
}

/// Field-level name rule for `#[validate(custom)]`: required and well-formed.
pub fn person_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "must not be blank"));
    }
    if !is_valid_name(value) {
        return Err(field_error(
            "name",
            "must be 3-50 letters, spaces, hyphens or apostrophes",
        ));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
