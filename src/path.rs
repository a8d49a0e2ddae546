//! URL template normalisation.
//!
//! HTTP annotations write path parameters as `{name}`; the target router
//! expects `:name`. Both spellings count as parameter segments.

fn is_brace_param(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

fn is_param_segment(segment: &str) -> bool {
    is_brace_param(segment) || segment.starts_with(':')
}

/// Rewrite every `{name}` segment to `:name`.
///
/// Literal segments, already colon-prefixed segments and empty segments are
/// left as they are, which makes the rewrite idempotent:
///
/// ```
/// use rpcroute::path::normalize_path;
///
/// assert_eq!(normalize_path("/v1/{id}/items/{itemId}"), "/v1/:id/items/:itemId");
/// assert_eq!(normalize_path("/v1/:id/items"), "/v1/:id/items");
/// ```
#[must_use]
pub fn normalize_path(template: &str) -> String {
    template
        .split('/')
        .map(|segment| {
            if is_brace_param(segment) {
                format!(":{}", &segment[1..segment.len() - 1])
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// True when at least one non-empty segment is a `{name}` or `:name` parameter.
#[must_use]
pub fn has_path_params(path: &str) -> bool {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .any(is_param_segment)
}

/// Parameter names in order of appearance, in either syntax.
#[must_use]
pub fn path_param_names(path: &str) -> Vec<&str> {
    path.split('/')
        .filter_map(|segment| {
            if is_brace_param(segment) {
                Some(&segment[1..segment.len() - 1])
            } else {
                segment.strip_prefix(':')
            }
        })
        .collect()
}
