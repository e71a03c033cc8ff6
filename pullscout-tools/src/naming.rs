//! Canonical tool-name derivation.

/// Derives a canonical snake_case tool name from a declaration identifier.
///
/// A separator is inserted wherever a lowercase ASCII letter is directly
/// followed by an uppercase one, then the whole string is lowercased. The
/// transformation is deterministic and idempotent on names that are already
/// snake_case.
#[must_use]
pub fn canonical_tool_name(identifier: &str) -> String {
    let mut name = String::with_capacity(identifier.len() + 4);
    let mut previous_was_lower = false;
    for ch in identifier.chars() {
        if previous_was_lower && ch.is_ascii_uppercase() {
            name.push('_');
        }
        previous_was_lower = ch.is_ascii_lowercase();
        name.push(ch.to_ascii_lowercase());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case_boundaries() {
        assert_eq!(canonical_tool_name("getPullRequest"), "get_pull_request");
        assert_eq!(
            canonical_tool_name("getPullRequestComments"),
            "get_pull_request_comments"
        );
    }

    #[test]
    fn idempotent_on_snake_case() {
        let once = canonical_tool_name("getPullRequest");
        assert_eq!(canonical_tool_name(&once), once);
        assert_eq!(canonical_tool_name("already_snake"), "already_snake");
    }

    #[test]
    fn leading_uppercase_gets_no_separator() {
        assert_eq!(canonical_tool_name("GetPull"), "get_pull");
    }

    #[test]
    fn digits_do_not_split() {
        assert_eq!(canonical_tool_name("fetch2Latest"), "fetch2latest");
    }
}
