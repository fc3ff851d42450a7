//! URL-safe slug derivation.

/// Derive a lowercase hyphenated slug from a bot name.
///
/// Common Nordic letters are transliterated; any other run of
/// non-alphanumeric characters collapses into a single hyphen. The slug is
/// derived once at creation and never regenerated on later name edits.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        let mapped: Option<char> = match ch {
            'ä' | 'å' | 'Ä' | 'Å' => Some('a'),
            'ö' | 'Ö' => Some('o'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        };

        match mapped {
            Some(c) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            None => pending_hyphen = true,
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Helper Bot"), "helper-bot");
        assert_eq!(slugify("Support  Agent 2"), "support-agent-2");
    }

    #[test]
    fn transliterates_nordic_letters() {
        assert_eq!(slugify("Ääkkös Bötti"), "aakkos-botti");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  Helper Bot!  "), "helper-bot");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn collapses_symbol_runs() {
        assert_eq!(slugify("Helper -- Bot"), "helper-bot");
        assert_eq!(slugify("a&b"), "a-b");
    }
}
