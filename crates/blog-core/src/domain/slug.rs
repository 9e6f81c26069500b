//! Slug rules: short URL-safe labels made of ASCII letters, digits,
//! hyphens and underscores.

/// Maximum slug length accepted by the post table.
pub const MAX_SLUG_LENGTH: usize = 250;

/// Returns whether `slug` is a non-empty slug within [`MAX_SLUG_LENGTH`].
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Derive a slug from free text.
///
/// Letters are lowercased, runs of whitespace and hyphens collapse into one
/// hyphen and every other character is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LENGTH);
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_title() {
        assert_eq!(
            slugify("Django Reinhardt: A legend of Jazz"),
            "django-reinhardt-a-legend-of-jazz"
        );
        assert_eq!(slugify("  many   spaces -- here "), "many-spaces-here");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("who-was-django-reinhardt"));
        assert!(is_valid_slug("post_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("percent%"));
        assert!(is_valid_slug(&"a".repeat(MAX_SLUG_LENGTH)));
        assert!(!is_valid_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)));
    }
}
