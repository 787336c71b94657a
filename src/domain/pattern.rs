//! Shell-style wildcard matching for clean targets

/// Returns true if `target` contains a wildcard (`*` or `?`).
pub fn is_wildcard(target: &str) -> bool {
    target.contains(['*', '?'])
}

/// Match a single path component against a `*`/`?` pattern.
///
/// Follows POSIX shell globbing for the leading dot: a name starting with `.`
/// is only matched by a pattern that itself starts with `.`.
///
/// # Examples
/// ```
/// use pydist::domain::wildcard_match;
///
/// assert!(wildcard_match("*.egg-info", "zamia_prolog.egg-info"));
/// assert!(!wildcard_match("*.egg-info", ".hidden.egg-info"));
/// ```
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0, 0);
    // Position of the last `*` seen and the name index it currently absorbs up to
    let mut star: Option<(usize, usize)> = None;

    while ni < name.len() {
        match pattern.get(pi) {
            Some('*') => {
                star = Some((pi, ni));
                pi += 1;
            }
            Some(&c) if c == '?' || c == name[ni] => {
                pi += 1;
                ni += 1;
            }
            _ => match star {
                Some((star_pi, star_ni)) => {
                    pi = star_pi + 1;
                    ni = star_ni + 1;
                    star = Some((star_pi, star_ni + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*.egg-info", "zamia_prolog.egg-info", true)]
    #[case("*.egg-info", "egg-info", false)]
    #[case("*.egg-info", "zamia_prolog.egg-info.bak", false)]
    #[case("*.egg-info", ".zamia.egg-info", false)]
    #[case(".*.egg-info", ".zamia.egg-info", true)]
    #[case("foo.db", "foo.db", true)]
    #[case("foo.?b", "foo.db", true)]
    #[case("foo.?b", "foo.b", false)]
    #[case("*", "anything", true)]
    #[case("a*b*c", "aXXbYYc", true)]
    #[case("a*b*c", "aXXbYY", false)]
    #[case("**", "x", true)]
    fn given_pattern_when_matching_then_follows_shell_rules(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(wildcard_match(pattern, name), expected);
    }

    #[test]
    fn given_plain_name_when_checking_wildcard_then_false() {
        assert!(!is_wildcard("build"));
        assert!(is_wildcard("*.egg-info"));
        assert!(is_wildcard("file?.txt"));
    }
}
