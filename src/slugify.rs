//! URL slugs for post titles and tags.
//!
//! Follows Django's `slugify`:
//! - `"Complex numbers"` → `"complex-numbers"`
//! - `"C++ & Rust!"` → `"c-rust"`
//! - `" left padded"` → `"left-padded"`
//! - `"under_d"` → `"under_d"` (underscores are word characters)
//!
//! Leading dashes and underscores are all stripped; only one trailing dash or
//! underscore is removed.

pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for c in lowered.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            in_separator = false;
        }
    }

    let trimmed = slug.trim_start_matches(['-', '_']);
    trimmed
        .strip_suffix(['-', '_'])
        .unwrap_or(trimmed)
        .to_string()
}
