use std::collections::HashMap;
use tracing::trace;

/// Path parameter name to the inline pattern extracted from its segment.
pub type PatternMap = HashMap<String, String>;

/// Removes inline patterns from templated path segments.
///
/// `/api/v1/{name:[a-z]+}/` becomes `/api/v1/{name}` and the pattern is
/// returned keyed by parameter name. Empty segments are dropped, so duplicate
/// and trailing slashes collapse; an empty template yields `/`.
pub fn sanitize_path(route_path: &str) -> (String, PatternMap) {
    let mut path = String::with_capacity(route_path.len());
    let mut patterns = PatternMap::new();
    for fragment in route_path.split('/').filter(|f| !f.is_empty()) {
        path.push('/');
        match fragment.strip_prefix('{').and_then(|f| f.split_once(':')) {
            Some((name, pattern)) => {
                let pattern = pattern.strip_suffix('}').unwrap_or(pattern);
                trace!(parameter = name, pattern, "extracted inline path pattern");
                patterns.insert(name.to_string(), pattern.to_string());
                path.push('{');
                path.push_str(name);
                path.push('}');
            }
            None => path.push_str(fragment),
        }
    }
    if path.is_empty() {
        path.push('/');
    }
    (path, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_patterns_and_keeps_plain_placeholders() {
        let (path, patterns) = sanitize_path("/api/v1/{id:[0-9]+}/items/{tag}");
        assert_eq!(path, "/api/v1/{id}/items/{tag}");
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns["id"], "[0-9]+");
    }

    #[test]
    fn only_the_first_colon_delimits_the_pattern() {
        let (path, patterns) = sanitize_path("/at/{time:[0-9]{2}:[0-9]{2}}");
        assert_eq!(path, "/at/{time}");
        assert_eq!(patterns["time"], "[0-9]{2}:[0-9]{2}");
    }

    #[test]
    fn colons_outside_placeholders_pass_through() {
        let (path, patterns) = sanitize_path("/v1/books:search");
        assert_eq!(path, "/v1/books:search");
        assert!(patterns.is_empty());
    }

    #[test]
    fn duplicate_and_trailing_slashes_collapse() {
        let (path, _) = sanitize_path("//api///{name:[a-z]}/");
        assert_eq!(path, "/api/{name}");
        assert_eq!(sanitize_path("/").0, "/");
        assert_eq!(sanitize_path("").0, "/");
    }

    #[test]
    fn no_colon_survives_inside_braces() {
        for template in ["/{a:x}/{b:y:z}/{c}", "/{d:}/e:f", "/{g:\\d+}"] {
            let (path, _) = sanitize_path(template);
            for segment in path.split('/').filter(|s| s.starts_with('{')) {
                assert!(!segment.contains(':'), "{segment} in {path}");
            }
        }
    }
}
