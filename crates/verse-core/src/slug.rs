//! Slug resolution: titles to URL-safe identifiers, kept unique per store.

use std::collections::HashSet;

/// Turn a title into a URL-safe slug.
///
/// Lowercases and trims, turns whitespace runs into a hyphen, drops
/// everything except ASCII word characters and hyphens, then collapses
/// repeated hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();

    let mut hyphenated = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            hyphenated.push(c);
            in_whitespace = false;
        }
    }

    let mut slug = String::with_capacity(hyphenated.len());
    for c in hyphenated
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
    {
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug
}

/// Return `candidate`, or `candidate-N` for the first `N >= 1` not in `taken`.
///
/// `taken` must already exclude the slug of the record being updated, so a
/// record never collides with itself.
pub fn ensure_unique_slug<'a, I>(candidate: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();

    if !taken.contains(candidate) {
        return candidate.to_string();
    }

    let mut counter = 1u64;
    loop {
        let attempt = format!("{candidate}-{counter}");
        if !taken.contains(attempt.as_str()) {
            return attempt;
        }
        counter += 1;
    }
}
