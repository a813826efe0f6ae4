use crate::casing::{camel_case, pascal_case};
use crate::route::model::HttpMethod;
use serde::Serialize;

/// Name of a route: the identifier from the document and the function name used in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNameInfo {
    pub original: String,
    pub usage: String,
}

impl RouteNameInfo {
    /// `original` is the operation id when the document has one, otherwise the
    /// camelCased method and path with placeholder braces removed.
    pub fn derive(method: HttpMethod, path: &str, operation_id: Option<&str>) -> Self {
        let original = match operation_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                let mut parts = vec![method.as_str().to_string()];
                parts.extend(
                    path.split('/')
                        .filter(|s| !s.is_empty())
                        .map(|s| s.replace(['{', '}'], "")),
                );
                camel_case(&parts.join("_"))
            }
        };

        Self {
            original,
            usage: build_route_name(method, path),
        }
    }
}

/// Request function name for a route.
///
/// `GET /users/{userId}/posts` -> `getUsersByUserIdPosts`
pub fn build_route_name(method: HttpMethod, path: &str) -> String {
    let mut parts = vec![method.as_str().to_string()];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('{') {
            parts.push(format!("By_{}", segment.replace(['{', '}'], "")));
        } else {
            parts.push(segment.to_string());
        }
    }
    camel_case(&parts.join("_"))
}

/// Names shared by every route of one module (tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub api_class_name: String,
    pub api_instance_name: String,
    pub api_parameters_type_name: String,
    pub query_key_object_name: String,
    pub mutation_key_object_name: String,
}

impl ModuleConfig {
    pub fn new(module_name: &str) -> Self {
        let pascal = pascal_case(module_name);
        let camel = camel_case(module_name);
        let upper = module_name.to_uppercase().replace('-', "_");
        Self {
            api_class_name: format!("{pascal}Api"),
            api_instance_name: format!("{camel}Api"),
            api_parameters_type_name: format!("T{pascal}ApiRequestParameters"),
            query_key_object_name: format!("{upper}_QUERY_KEY"),
            mutation_key_object_name: format!("{upper}_MUTATION_KEY"),
        }
    }
}
