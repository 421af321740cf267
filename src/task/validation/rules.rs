//! Individual field rules.
//!
//! Each rule is a pure function over one field of a draft. A rule returns the
//! message of the first check that fails, or `None` when the field is valid.

/// Minimum title length in characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Minimum description length in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 10;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// Maximum long description length in characters.
pub const LONG_DESCRIPTION_MAX_CHARS: usize = 10_000;

/// Checks the task title.
#[must_use]
pub fn check_title(title: &str) -> Option<String> {
    check_bounded_text(title, "Title", TITLE_MIN_CHARS, TITLE_MAX_CHARS)
}

/// Checks the short description.
#[must_use]
pub fn check_description(description: &str) -> Option<String> {
    check_bounded_text(
        description,
        "Description",
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
    )
}

/// Checks the long description.
///
/// Absent and blank values are accepted without further checks.
#[must_use]
pub fn check_long_description(long_description: Option<&str>) -> Option<String> {
    let text = long_description.filter(|text| !is_blank(text))?;
    (char_len(text) > LONG_DESCRIPTION_MAX_CHARS).then(|| {
        format!("Long description cannot exceed {LONG_DESCRIPTION_MAX_CHARS} characters")
    })
}

fn check_bounded_text(value: &str, label: &str, min: usize, max: usize) -> Option<String> {
    if is_blank(value) {
        return Some(format!("{label} cannot be empty"));
    }
    let length = char_len(value);
    if length < min {
        return Some(format!("{label} must be at least {min} characters"));
    }
    if length > max {
        return Some(format!("{label} cannot exceed {max} characters"));
    }
    None
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
