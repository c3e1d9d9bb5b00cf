//! Symbolic keys derived from display names.
//!
//! Only ASCII letters, digits and spaces survive normalization. Two people whose
//! last name and first initial match get the same key; nothing here detects that.

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// `"Dave Mustaine"` becomes `mustaine_d`.
pub fn person_key(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|&c| is_key_char(c))
        .collect::<String>()
        .to_lowercase();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    let last = parts.last().copied().unwrap_or("");
    let initial = parts
        .first()
        .and_then(|first| first.chars().next())
        .map(String::from)
        .unwrap_or_default();
    format!("{last}_{initial}")
}

/// `"Godspeed You! Black Emperor"` becomes `godspeed_you_black_emperor`.
pub fn group_key(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if is_key_char(c) { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Whether a name contains any ASCII letter or digit, the only characters that
/// survive key normalization.
pub fn has_key_tokens(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphanumeric())
}
