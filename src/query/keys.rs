use crate::route::model::{HttpMethod, ParsedRoute};

fn is_placeholder(segment: &str) -> bool {
    segment.contains('{')
}

fn strip_braces(segment: &str) -> String {
    segment.replace(['$', '{', '}'], "")
}

/// Path segments that take part in a cache key (`api` prefixes are noise).
fn key_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != "api")
}

/// `GET /api/users/{userId}/posts` -> `GET_USERS_USERID_POSTS`
pub fn key_constant_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<String> = key_segments(path)
        .map(|s| strip_braces(s).to_uppercase().replace('-', "_"))
        .collect();
    let method = method.as_str().to_uppercase();
    if segments.is_empty() {
        method
    } else {
        format!("{method}_{}", segments.join("_"))
    }
}

/// Key array returned by a parameterised key function:
/// `['users', userId, 'posts', params]`.
pub fn query_key_array(route: &ParsedRoute) -> String {
    let mut entries: Vec<String> = key_segments(&route.path)
        .map(|s| {
            if is_placeholder(s) {
                strip_braces(s).replace('-', "_")
            } else {
                format!("'{s}'")
            }
        })
        .collect();
    if route.query.is_some() {
        entries.push("params".to_string());
    }
    if route.payload.is_some() {
        entries.push("payload".to_string());
    }
    format!("[{}]", entries.join(", "))
}

/// `(<required signatures>)=>[...]`
pub fn query_key_function(route: &ParsedRoute, required_signatures: &[String]) -> String {
    format!(
        "({})=>{}",
        required_signatures.join(", "),
        query_key_array(route)
    )
}

/// Static mutation key: every path segment quoted, placeholders included.
pub fn mutation_key_content(path: &str) -> String {
    let entries: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| format!("'{}'", strip_braces(s)))
        .collect();
    format!("[{}]", entries.join(", "))
}
