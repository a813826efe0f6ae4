use crate::route::naming::RouteNameInfo;
use serde::Serialize;

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method: {s}"))
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// TypeScript type expression, e.g. `string` or `UserDto[]`.
    pub ty: String,
    pub optional: bool,
    pub location: ParamLocation,
}

/// Query or header parameters of a route taken as a single object argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamGroup {
    /// True when every parameter of the group is optional.
    pub optional: bool,
}

/// The detected body argument of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub ty: String,
    pub optional: bool,
}

/// `discriminator` of a JSON body schema, mapping entries kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discriminator {
    pub property_name: String,
    pub mapping: Vec<(String, String)>,
}

/// The parts of a body schema that shape its validation expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaShape {
    pub is_array: bool,
    pub discriminator: Option<Discriminator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BodyInfo {
    /// Schema of the `application/json` content, if any.
    pub schema: Option<SchemaShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseVariant {
    pub status: String,
    pub is_success: bool,
    pub schema: Option<SchemaShape>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseInfo {
    /// Detected success response type.
    pub ty: Option<String>,
    pub variants: Vec<ResponseVariant>,
}

impl ResponseInfo {
    /// The first variant flagged as a success response.
    pub fn success(&self) -> Option<&ResponseVariant> {
        self.variants.iter().find(|v| v.is_success)
    }
}

/// Raw value of a duration vendor extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DurationLiteral {
    Number(f64),
    Text(String),
}

/// `x-` fields of an operation the generator understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VendorExtensions {
    /// `x-query-key`
    pub query_key: Option<String>,
    /// `x-invalidate-query-key`
    pub invalidate_query_key: Vec<String>,
    /// `x-staleTime` / `x-stale-time`
    pub stale_time: Option<DurationLiteral>,
    /// `x-gcTime` / `x-gc-time`
    pub gc_time: Option<DurationLiteral>,
}

/// One API operation as produced by the document parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRoute {
    pub method: HttpMethod,
    /// Path template with `{param}` placeholders.
    pub path: String,
    pub module_name: String,
    pub route_name: RouteNameInfo,
    pub parameters: Vec<Parameter>,
    pub query: Option<ParamGroup>,
    pub headers: Option<ParamGroup>,
    pub payload: Option<Payload>,
    pub request_body: Option<BodyInfo>,
    pub response: ResponseInfo,
    pub extensions: VendorExtensions,
}

impl ParsedRoute {
    /// A route with no parameters, body or extensions.
    pub fn new(method: HttpMethod, path: impl Into<String>, module_name: impl Into<String>) -> Self {
        let path = path.into();
        let route_name = RouteNameInfo::derive(method, &path, None);
        Self {
            method,
            path,
            module_name: module_name.into(),
            route_name,
            parameters: Vec::new(),
            query: None,
            headers: None,
            payload: None,
            request_body: None,
            response: ResponseInfo::default(),
            extensions: VendorExtensions::default(),
        }
    }

    /// Add a parameter, keeping the query/header groups in sync.
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        match parameter.location {
            ParamLocation::Path => {}
            ParamLocation::Query => {
                let optional = self.query.map_or(true, |g| g.optional) && parameter.optional;
                self.query = Some(ParamGroup { optional });
            }
            ParamLocation::Header => {
                let optional = self.headers.map_or(true, |g| g.optional) && parameter.optional;
                self.headers = Some(ParamGroup { optional });
            }
        }
        self.parameters.push(parameter);
        self
    }

    pub fn with_payload(mut self, ty: impl Into<String>, optional: bool, schema: Option<SchemaShape>) -> Self {
        self.payload = Some(Payload {
            ty: ty.into(),
            optional,
        });
        self.request_body = Some(BodyInfo { schema });
        self
    }

    pub fn with_response(mut self, status: &str, ty: Option<String>, schema: Option<SchemaShape>) -> Self {
        let is_success = status.starts_with('2');
        if is_success && self.response.ty.is_none() {
            self.response.ty = ty;
        }
        self.response.variants.push(ResponseVariant {
            status: status.to_string(),
            is_success,
            schema,
        });
        self
    }

    pub fn with_operation_id(mut self, operation_id: Option<&str>) -> Self {
        self.route_name = RouteNameInfo::derive(self.method, &self.path, operation_id);
        self
    }

    pub fn with_extensions(mut self, extensions: VendorExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn path_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            location,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
