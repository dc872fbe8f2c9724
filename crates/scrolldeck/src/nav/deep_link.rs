/// Location-fragment helpers for deep links (`#section-id`).

/// Extract a section id from a fragment string. Accepts both `#purpose` and
/// a bare `purpose`; an empty fragment carries no target.
pub fn parse(input: &str) -> Option<&str> {
    let id = input.strip_prefix('#').unwrap_or(input).trim();
    if id.is_empty() { None } else { Some(id) }
}

pub fn format(section_id: &str) -> String {
    format!("#{section_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_hash() {
        assert_eq!(parse("#purpose"), Some("purpose"));
    }

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(parse("purpose"), Some("purpose"));
    }

    #[test]
    fn test_empty_fragment_has_no_target() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("#"), None);
        assert_eq!(parse("  "), None);
    }

    #[test]
    fn test_round_trip() {
        let frag = format("learnings");
        assert_eq!(parse(&frag), Some("learnings"));
    }
}
