//! Length-bounded text checks shared by the domain value types.

/// Reason a text value failed its bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextViolation {
    /// The value is empty after trimming.
    Empty,
    /// The value exceeds the limit; carries the observed length.
    TooLong(usize),
}

/// Checks a name-like value is at most `max` characters as given and
/// non-empty once trimmed, returning the trimmed value.
///
/// Surrounding whitespace counts towards the limit.
pub(crate) fn bounded_name(raw: &str, max: usize) -> Result<String, TextViolation> {
    let length = raw.chars().count();
    if length > max {
        return Err(TextViolation::TooLong(length));
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextViolation::Empty);
    }
    Ok(trimmed.to_owned())
}

/// Checks a free-text value is at most `max` characters, returning the
/// observed length on failure. Empty values and surrounding whitespace are
/// kept as given.
pub(crate) fn bounded_text(raw: String, max: usize) -> Result<String, usize> {
    let length = raw.chars().count();
    if length > max {
        return Err(length);
    }
    Ok(raw)
}
