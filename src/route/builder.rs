//! Per-route request/response configuration.
//!
//! [`build_route_config`] folds an ordered list of steps over an empty
//! [`RouteConfig`]. A step reads the route and the fields written by the steps
//! before it, never the ones after it, so the order of [`STEPS`] is part of the
//! contract.

use crate::casing::pascal_case;
use crate::route::model::ParsedRoute;
use crate::route::schema::{self, SchemaDescriptor, SchemaSubject};
use serde::Serialize;

/// Type of the HTTP client instance argument every request function accepts.
pub const CLIENT_TYPE: &str = "KyInstance";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteConfig {
    pub request: RequestConfig,
    pub response: ResponseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    pub function_name: String,
    pub path_params: PathParams,
    pub query: ParamsDto,
    pub headers: ParamsDto,
    pub payload: PayloadDto,
    pub options: OptionsType,
    pub parameters: Parameters,
    pub schema: SchemaDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathParams {
    pub signatures: Vec<String>,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsDto {
    pub dto_name: Option<String>,
    /// Empty when `dto_name` is `None`.
    pub schema_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDto {
    pub dto_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsType {
    pub type_expr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameters {
    pub signatures: RequiredAndAll,
    pub arguments: RequiredAndAll,
}

/// `all` is always `required` followed by the client instance and options entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredAndAll {
    pub required: Vec<String>,
    pub all: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseConfig {
    pub dto_name: Option<String>,
    pub schema: SchemaDescriptor,
}

pub type Step = fn(&ParsedRoute, RouteConfig) -> RouteConfig;

/// Steps in dependency order.
pub const STEPS: [(&str, Step); 14] = [
    ("function_name", set_function_name),
    ("path_params.signatures", set_path_params_signatures),
    ("path_params.arguments", set_path_params_arguments),
    ("query", set_query_dto),
    ("headers", set_headers_dto),
    ("payload", set_payload_dto),
    ("options", set_options_type),
    ("parameters.signatures.required", set_required_signatures),
    ("parameters.signatures.all", set_all_signatures),
    ("parameters.arguments.required", set_required_arguments),
    ("parameters.arguments.all", set_all_arguments),
    ("response.dto_name", set_response_dto),
    ("request.schema", set_request_schema),
    ("response.schema", set_response_schema),
];

/// Derive every request/response artifact name of a route.
pub fn build_route_config(route: &ParsedRoute) -> RouteConfig {
    let config = STEPS
        .iter()
        .fold(RouteConfig::default(), |config, (_, step)| step(route, config));
    tracing::debug!(
        route = %route.route_name.usage,
        signatures = config.request.parameters.signatures.all.len(),
        "built route config"
    );
    config
}

fn signature(name: &str, optional: bool, ty: &str) -> String {
    if optional {
        format!("{name}?:{ty}")
    } else {
        format!("{name}:{ty}")
    }
}

fn inline_signature(name: &str, optional: bool, ty: Option<&str>) -> String {
    let ty = ty.unwrap_or_default();
    if optional {
        format!("{name}?: {ty}")
    } else {
        format!("{name}: {ty}")
    }
}

// Reads: route name.
fn set_function_name(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.request.function_name = route.route_name.usage.clone();
    config
}

// Reads: path parameters.
fn set_path_params_signatures(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.request.path_params.signatures = route
        .path_parameters()
        .map(|p| signature(&p.name, p.optional, &p.ty))
        .collect();
    config
}

// Reads: path parameters.
fn set_path_params_arguments(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.request.path_params.arguments = route.path_parameters().map(|p| p.name.clone()).collect();
    config
}

// Reads: query group, original route name.
fn set_query_dto(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let original = &route.route_name.original;
    config.request.query = match route.query {
        Some(_) => ParamsDto {
            dto_name: Some(pascal_case(&format!("{original}QueryParams"))),
            schema_name: format!("{original}QueryParamsSchema"),
        },
        None => ParamsDto::default(),
    };
    config
}

// Reads: header group, original route name.
fn set_headers_dto(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let original = &route.route_name.original;
    config.request.headers = match route.headers {
        Some(_) => ParamsDto {
            dto_name: Some(pascal_case(&format!("{original}Headers"))),
            schema_name: format!("{original}HeadersSchema"),
        },
        None => ParamsDto::default(),
    };
    config
}

// Reads: payload.
fn set_payload_dto(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.request.payload.dto_name = route.payload.as_ref().map(|p| p.ty.clone());
    config
}

// Reads: headers.dto_name.
fn set_options_type(_route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.request.options.type_expr = match &config.request.headers.dto_name {
        Some(headers) => format!("Omit<Options, 'headers'> & {{ headers: {headers} }}"),
        None => "Options".to_string(),
    };
    config
}

// Reads: path_params.signatures, query.dto_name, payload.dto_name.
fn set_required_signatures(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let mut required = config.request.path_params.signatures.clone();
    if let Some(query) = route.query {
        required.push(inline_signature(
            "params",
            query.optional,
            config.request.query.dto_name.as_deref(),
        ));
    }
    if let Some(payload) = &route.payload {
        required.push(inline_signature(
            "payload",
            payload.optional,
            config.request.payload.dto_name.as_deref(),
        ));
    }
    config.request.parameters.signatures.required = required;
    config
}

// Reads: parameters.signatures.required, options.type_expr.
fn set_all_signatures(_route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let mut all = config.request.parameters.signatures.required.clone();
    all.push(format!("kyInstance?: {CLIENT_TYPE}"));
    all.push(format!("options?: {}", config.request.options.type_expr));
    config.request.parameters.signatures.all = all;
    config
}

// Reads: path_params.arguments.
fn set_required_arguments(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let mut required = config.request.path_params.arguments.clone();
    if route.query.is_some() {
        required.push("params".to_string());
    }
    if route.payload.is_some() {
        required.push("payload".to_string());
    }
    config.request.parameters.arguments.required = required;
    config
}

// Reads: parameters.arguments.required.
fn set_all_arguments(_route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let mut all = config.request.parameters.arguments.required.clone();
    all.push("kyInstance".to_string());
    all.push("options".to_string());
    config.request.parameters.arguments.all = all;
    config
}

// Reads: response type.
fn set_response_dto(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    config.response.dto_name = route.response.ty.clone();
    config
}

// Reads: payload.dto_name, request body schema.
fn set_request_schema(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let shape = route.request_body.as_ref().and_then(|b| b.schema.as_ref());
    config.request.schema = schema::describe(
        config.request.payload.dto_name.as_deref(),
        shape,
        SchemaSubject::Payload,
    );
    config
}

// Reads: response.dto_name, first success response schema.
fn set_response_schema(route: &ParsedRoute, mut config: RouteConfig) -> RouteConfig {
    let shape = route.response.success().and_then(|v| v.schema.as_ref());
    config.response.schema = schema::describe(
        config.response.dto_name.as_deref(),
        shape,
        SchemaSubject::Response,
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::model::{
        Discriminator, HttpMethod, ParamLocation, Parameter, SchemaShape,
    };
    use pretty_assertions::assert_eq;

    fn user_posts_route() -> ParsedRoute {
        ParsedRoute::new(HttpMethod::Get, "/users/{userId}/posts", "users")
            .with_parameter(Parameter::new("userId", "string", ParamLocation::Path))
            .with_parameter(Parameter::new("limit", "number", ParamLocation::Query).optional())
            .with_response("200", Some("PostDto[]".into()), Some(SchemaShape {
                is_array: true,
                discriminator: None,
            }))
    }

    #[test]
    fn get_with_path_and_query_params() {
        let config = build_route_config(&user_posts_route());
        let request = &config.request;

        assert_eq!(request.function_name, "getUsersByUserIdPosts");
        assert_eq!(request.path_params.signatures, vec!["userId:string"]);
        assert_eq!(request.path_params.arguments, vec!["userId"]);
        assert_eq!(
            request.query.dto_name.as_deref(),
            Some("GetUsersUserIdPostsQueryParams")
        );
        assert_eq!(request.query.schema_name, "getUsersUserIdPostsQueryParamsSchema");
        assert_eq!(request.headers.dto_name, None);
        assert_eq!(request.payload.dto_name, None);
        assert_eq!(request.options.type_expr, "Options");
        assert_eq!(
            request.parameters.signatures.required,
            vec!["userId:string", "params?: GetUsersUserIdPostsQueryParams"]
        );
        assert_eq!(
            request.parameters.signatures.all,
            vec![
                "userId:string",
                "params?: GetUsersUserIdPostsQueryParams",
                "kyInstance?: KyInstance",
                "options?: Options",
            ]
        );
        assert_eq!(request.parameters.arguments.required, vec!["userId", "params"]);
        assert_eq!(
            request.parameters.arguments.all,
            vec!["userId", "params", "kyInstance", "options"]
        );
        assert_eq!(request.schema.expression, None);

        assert_eq!(config.response.dto_name.as_deref(), Some("PostDto[]"));
        assert_eq!(
            config.response.schema.expression.as_deref(),
            Some("z.array(postDtoSchema)")
        );
    }

    #[test]
    fn post_with_headers_and_payload() {
        let route = ParsedRoute::new(HttpMethod::Post, "/users", "users")
            .with_parameter(Parameter::new("X-Tenant", "string", ParamLocation::Header))
            .with_payload("CreateUserDto", false, Some(SchemaShape::default()))
            .with_response("201", Some("UserDto".into()), Some(SchemaShape::default()));
        let config = build_route_config(&route);
        let request = &config.request;

        assert!(request.path_params.signatures.is_empty());
        assert_eq!(request.headers.dto_name.as_deref(), Some("PostUsersHeaders"));
        assert_eq!(
            request.options.type_expr,
            "Omit<Options, 'headers'> & { headers: PostUsersHeaders }"
        );
        assert_eq!(request.parameters.signatures.required, vec!["payload: CreateUserDto"]);
        assert_eq!(
            request.parameters.signatures.all.last().map(String::as_str),
            Some("options?: Omit<Options, 'headers'> & { headers: PostUsersHeaders }")
        );
        assert_eq!(request.parameters.arguments.required, vec!["payload"]);
        assert_eq!(request.schema.expression.as_deref(), Some("createUserDtoSchema"));
        assert_eq!(request.schema.list, vec!["createUserDtoSchema"]);
        assert_eq!(config.response.schema.expression.as_deref(), Some("userDtoSchema"));
    }

    #[test]
    fn optional_payload_and_path_param() {
        let route = ParsedRoute::new(HttpMethod::Put, "/files/{name}", "files")
            .with_parameter(Parameter::new("name", "string", ParamLocation::Path).optional())
            .with_payload("FileDto", true, None);
        let config = build_route_config(&route);
        assert_eq!(
            config.request.parameters.signatures.required,
            vec!["name?:string", "payload?: FileDto"]
        );
    }

    #[test]
    fn void_response_has_no_schema() {
        let route = ParsedRoute::new(HttpMethod::Delete, "/users/{id}", "users")
            .with_parameter(Parameter::new("id", "number", ParamLocation::Path))
            .with_response("204", Some("void".into()), None);
        let config = build_route_config(&route);
        assert_eq!(config.response.schema.expression, None);
        assert!(config.response.schema.list.is_empty());
    }

    #[test]
    fn discriminated_response() {
        let shape = SchemaShape {
            is_array: false,
            discriminator: Some(Discriminator {
                property_name: "kind".into(),
                mapping: vec![
                    ("cat".into(), "#/Cat".into()),
                    ("dog".into(), "#/Dog".into()),
                ],
            }),
        };
        let route = ParsedRoute::new(HttpMethod::Get, "/pets/{id}", "pets")
            .with_parameter(Parameter::new("id", "string", ParamLocation::Path))
            .with_response("200", Some("PetDto".into()), Some(shape));
        let config = build_route_config(&route);
        let expression = config.response.schema.expression.unwrap();

        assert_eq!(config.response.schema.list, vec!["catDtoSchema", "dogDtoSchema"]);
        assert_eq!(expression.matches(".with(").count(), 2);
        assert!(expression.ends_with(".otherwise(()=>null)"));
    }

    #[test]
    fn all_extends_required_with_two_entries() {
        let config = build_route_config(&user_posts_route());
        for split in [
            &config.request.parameters.signatures,
            &config.request.parameters.arguments,
        ] {
            assert_eq!(split.all.len(), split.required.len() + 2);
            assert_eq!(&split.all[..split.required.len()], split.required.as_slice());
        }
    }

    #[test]
    fn building_twice_is_identical() {
        let route = user_posts_route();
        assert_eq!(build_route_config(&route), build_route_config(&route));
    }
}
