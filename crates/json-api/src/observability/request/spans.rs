//! Route templates for span names and metric labels.

/// Replace numeric path segments with `{id}` so labels stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| if is_numeric(segment) { "{id}" } else { segment })
        .collect();

    format!("/{}", segments.join("/"))
}

fn is_numeric(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);

    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}
