//! OpenAPI 3.x / Swagger 2.0 documents to [`ParsedRoute`] records.
//!
//! Both YAML and JSON documents are read into a `serde_yaml::Value` and walked
//! from there. Only what route derivation needs is extracted: parameters,
//! body and response types, JSON schema shapes and the `x-` extensions.

use crate::casing::{camel_case, pascal_case};
use crate::errors::{AutogenError, Result};
use crate::route::model::{
    Discriminator, DurationLiteral, HttpMethod, ParamLocation, Parameter, ParsedRoute,
    SchemaShape, VendorExtensions,
};
use serde_yaml::Value;
use std::path::Path;

static NULL: Value = Value::Null;

/// A parsed API description document.
#[derive(Debug, Clone, Default)]
pub struct ApiDocument {
    pub title: Option<String>,
    /// Value of the `openapi` or `swagger` field.
    pub version: String,
    pub routes: Vec<ParsedRoute>,
}

/// Parse an API description from a YAML or JSON file.
pub fn parse_document(path: &Path) -> Result<ApiDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| AutogenError::Document {
        path: path.to_path_buf(),
        message: format!("could not read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parsed = match ext {
        "yaml" | "yml" => parse_yaml(&content),
        "json" => parse_json(&content),
        _ => {
            // Try YAML first, fall back to JSON
            parse_yaml(&content).or_else(|_| parse_json(&content))
        }
    };

    let document = parsed.map_err(|message| AutogenError::Document {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(
        path = %path.display(),
        routes = document.routes.len(),
        "parsed API description"
    );
    Ok(document)
}

/// Parse a document from a YAML string.
pub fn parse_yaml(content: &str) -> std::result::Result<ApiDocument, String> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))?;
    parse_value(&value)
}

/// Parse a document from a JSON string.
pub fn parse_json(content: &str) -> std::result::Result<ApiDocument, String> {
    let json_value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))?;
    // Convert to a YAML value for unified processing
    let value = serde_yaml::to_value(json_value).map_err(|e| format!("Conversion error: {e}"))?;
    parse_value(&value)
}

fn parse_value(root: &Value) -> std::result::Result<ApiDocument, String> {
    let version = root
        .get("openapi")
        .or_else(|| root.get("swagger"))
        .and_then(scalar_string)
        .ok_or("missing `openapi` or `swagger` version field")?;

    let title = root
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut routes = Vec::new();
    if let Some(paths) = root.get("paths") {
        let paths = paths.as_mapping().ok_or("`paths` must be a mapping")?;
        for (path_key, path_item) in paths {
            let Some(path) = path_key.as_str() else {
                continue;
            };
            let path_item = resolve_ref(root, path_item);
            let shared_params = path_item.get("parameters");

            let Some(item_map) = path_item.as_mapping() else {
                continue;
            };
            for (method_key, operation) in item_map {
                let Some(method) = method_key.as_str().and_then(|m| m.parse::<HttpMethod>().ok())
                else {
                    continue;
                };
                routes.push(parse_operation(root, method, path, operation, shared_params));
            }
        }
    }

    Ok(ApiDocument {
        title,
        version,
        routes,
    })
}

fn parse_operation(
    root: &Value,
    method: HttpMethod,
    path: &str,
    operation: &Value,
    shared_params: Option<&Value>,
) -> ParsedRoute {
    let operation_id = operation.get("operationId").and_then(Value::as_str);
    let mut route = ParsedRoute::new(method, path, module_name(operation, path))
        .with_operation_id(operation_id)
        .with_extensions(extensions(operation));

    let mut declared: Vec<&Value> = Vec::new();
    for list in [shared_params, operation.get("parameters")] {
        for param in list.and_then(Value::as_sequence).into_iter().flatten() {
            let param = resolve_ref(root, param);
            // Operation-level parameters replace path-level ones with the same name and location
            declared.retain(|p| {
                p.get("name") != param.get("name") || p.get("in") != param.get("in")
            });
            declared.push(param);
        }
    }

    let mut body = None;
    for param in declared {
        let Some(name) = param.get("name").and_then(Value::as_str) else {
            continue;
        };
        let required = param.get("required").and_then(Value::as_bool).unwrap_or(false);
        let location = match param.get("in").and_then(Value::as_str) {
            Some("path") => ParamLocation::Path,
            Some("query") => ParamLocation::Query,
            Some("header") => ParamLocation::Header,
            Some("body") => {
                // Swagger 2 body parameter
                let schema = param.get("schema").unwrap_or(&NULL);
                body = Some((type_name(root, schema), !required, Some(schema_shape(root, schema))));
                continue;
            }
            _ => continue,
        };

        // OpenAPI 3 nests the type under `schema`, Swagger 2 puts it on the parameter
        let schema = param.get("schema").unwrap_or(param);
        let mut parameter = Parameter::new(name, type_name(root, schema), location);
        if !required && location != ParamLocation::Path {
            parameter = parameter.optional();
        }
        route = route.with_parameter(parameter);
    }

    for placeholder in placeholders(path) {
        if !route.path_parameters().any(|p| p.name == placeholder) {
            tracing::debug!(path, placeholder, "undeclared path parameter, typed as string");
            route = route.with_parameter(Parameter::new(placeholder, "string", ParamLocation::Path));
        }
    }

    if let Some(request_body) = operation.get("requestBody") {
        body = request_body_payload(root, resolve_ref(root, request_body));
    }
    if let Some((ty, optional, shape)) = body {
        route = route.with_payload(ty, optional, shape);
    }

    if let Some(responses) = operation.get("responses").and_then(Value::as_mapping) {
        for (status, response) in responses {
            let Some(status) = scalar_string(status) else {
                continue;
            };
            let response = resolve_ref(root, response);
            let schema = response
                .get("content")
                .and_then(|c| json_content(c))
                .and_then(|media| media.get("schema"))
                .or_else(|| response.get("schema"));
            route = match schema {
                Some(schema) => route.with_response(
                    &status,
                    Some(type_name(root, schema)),
                    Some(schema_shape(root, schema)),
                ),
                None => route.with_response(&status, Some("void".to_string()), None),
            };
        }
    }

    route
}

/// `(type, optional, json schema shape)` of an OpenAPI 3 request body.
fn request_body_payload(
    root: &Value,
    request_body: &Value,
) -> Option<(String, bool, Option<SchemaShape>)> {
    let optional = !request_body
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let content = request_body.get("content")?.as_mapping()?;

    if let Some(media) = request_body.get("content").and_then(json_content) {
        let schema = media.get("schema").unwrap_or(&NULL);
        return Some((type_name(root, schema), optional, Some(schema_shape(root, schema))));
    }

    let (media_type, media) = content.iter().next()?;
    let ty = match media_type.as_str() {
        Some("multipart/form-data") => "FormData".to_string(),
        _ => media
            .get("schema")
            .map_or_else(|| "any".to_string(), |s| type_name(root, s)),
    };
    Some((ty, optional, None))
}

/// The `application/json` (or other `+json`) entry of a content map.
fn json_content(content: &Value) -> Option<&Value> {
    let content = content.as_mapping()?;
    content
        .iter()
        .find(|(k, _)| k.as_str() == Some("application/json"))
        .or_else(|| {
            content
                .iter()
                .find(|(k, _)| k.as_str().is_some_and(|k| k.contains("json")))
        })
        .map(|(_, v)| v)
}

fn placeholders(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
}

/// First tag, else the first literal path segment other than `api`.
fn module_name(operation: &Value, path: &str) -> String {
    let tag = operation
        .get("tags")
        .and_then(Value::as_sequence)
        .and_then(|tags| tags.first())
        .and_then(Value::as_str);
    if let Some(tag) = tag {
        return camel_case(tag);
    }
    path.split('/')
        .find(|s| !s.is_empty() && *s != "api" && !s.contains('{'))
        .map(camel_case)
        .unwrap_or_else(|| "common".to_string())
}

fn extensions(operation: &Value) -> VendorExtensions {
    let invalidate_query_key = match operation.get("x-invalidate-query-key") {
        Some(Value::Sequence(entries)) => entries.iter().filter_map(scalar_string).collect(),
        Some(value) => scalar_string(value).into_iter().collect(),
        None => Vec::new(),
    };
    let duration = |names: [&str; 2]| {
        names
            .iter()
            .find_map(|name| operation.get(*name))
            .and_then(duration_literal)
    };

    VendorExtensions {
        query_key: operation.get("x-query-key").and_then(scalar_string),
        invalidate_query_key,
        stale_time: duration(["x-staleTime", "x-stale-time"]),
        gc_time: duration(["x-gcTime", "x-gc-time"]),
    }
}

fn duration_literal(value: &Value) -> Option<DurationLiteral> {
    match value {
        Value::Number(n) => n.as_f64().map(DurationLiteral::Number),
        Value::String(s) => Some(DurationLiteral::Text(s.clone())),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Follow a local `$ref` (`#/components/...`); other values are returned as is.
fn resolve_ref<'a>(root: &'a Value, value: &'a Value) -> &'a Value {
    let Some(pointer) = value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix("#/"))
    else {
        return value;
    };
    pointer
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .try_fold(root, |node, segment| node.get(segment.as_str()))
        .unwrap_or(value)
}

/// `#/components/schemas/user_profile` -> `UserProfileDto`
fn ref_type_name(reference: &str) -> String {
    let name = pascal_case(reference.rsplit('/').next().unwrap_or(reference));
    if name.ends_with("Dto") {
        name
    } else {
        format!("{name}Dto")
    }
}

/// TypeScript type expression of a schema.
fn type_name(root: &Value, schema: &Value) -> String {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        return ref_type_name(reference);
    }
    if let Some([single]) = schema.get("allOf").and_then(Value::as_sequence).map(Vec::as_slice) {
        return type_name(root, single);
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(variants) = schema.get(key).and_then(Value::as_sequence) {
            let names: Vec<String> = variants.iter().map(|v| type_name(root, v)).collect();
            if !names.is_empty() {
                return names.join(" | ");
            }
        }
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("array") => {
            let item = schema
                .get("items")
                .map_or_else(|| "any".to_string(), |items| type_name(root, items));
            if item.contains(' ') {
                format!("({item})[]")
            } else {
                format!("{item}[]")
            }
        }
        Some("integer" | "number") => "number".to_string(),
        Some("boolean") => "boolean".to_string(),
        Some("string") => match schema.get("format").and_then(Value::as_str) {
            Some("binary") => "File".to_string(),
            _ => "string".to_string(),
        },
        Some("object") => match schema.get("additionalProperties") {
            Some(value @ Value::Mapping(_)) => {
                format!("Record<string, {}>", type_name(root, value))
            }
            _ => "object".to_string(),
        },
        Some("null") => "null".to_string(),
        _ if schema.get("properties").is_some() => "object".to_string(),
        _ => "any".to_string(),
    }
}

/// Array-ness and discriminator of a schema, following one `$ref`.
fn schema_shape(root: &Value, schema: &Value) -> SchemaShape {
    let target = resolve_ref(root, schema);
    SchemaShape {
        is_array: target.get("type").and_then(Value::as_str) == Some("array"),
        discriminator: discriminator(target),
    }
}

fn discriminator(schema: &Value) -> Option<Discriminator> {
    let discriminator = schema.get("discriminator")?;
    let property_name = discriminator.get("propertyName")?.as_str()?.to_string();
    let mapping: Vec<(String, String)> = discriminator
        .get("mapping")?
        .as_mapping()?
        .iter()
        .filter_map(|(tag, reference)| Some((scalar_string(tag)?, reference.as_str()?.to_string())))
        .collect();
    (!mapping.is_empty()).then_some(Discriminator {
        property_name,
        mapping,
    })
}
