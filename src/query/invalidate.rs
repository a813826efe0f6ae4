//! `x-invalidate-query-key` directives.
//!
//! A directive names the `x-query-key` of a GET route, either bare
//! (`USER_LIST`) or as a call with argument references
//! (`USER_DETAIL($parameters.userId, $parameters.$query)`). Each directive
//! resolves to a call of the target route's key function inside a mutation's
//! success handler, where `variables` holds the mutation input and `data` the
//! response.

use crate::casing::camel_case;
use crate::query::keys::key_constant_name;
use crate::route::model::{HttpMethod, ParsedRoute};
use std::collections::BTreeMap;

/// A classified argument token of a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgRef {
    /// `$parameters.$query`
    QueryParams,
    /// `$parameters.<path>`
    Parameter(String),
    /// `$payload.<path>`
    Payload(String),
    /// `$response.<path>`
    Response(String),
    Unresolvable(String),
}

impl ArgRef {
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        if token == "$parameters.$query" {
            return ArgRef::QueryParams;
        }
        let field = |rest: &str| (!rest.is_empty()).then(|| rest.to_string());
        if let Some(rest) = token.strip_prefix("$parameters.").and_then(field) {
            ArgRef::Parameter(rest)
        } else if let Some(rest) = token.strip_prefix("$payload.").and_then(field) {
            ArgRef::Payload(rest)
        } else if let Some(rest) = token.strip_prefix("$response.").and_then(field) {
            ArgRef::Response(rest)
        } else {
            ArgRef::Unresolvable(token.to_string())
        }
    }

    /// Expression inside the mutation callback, `None` when unresolvable.
    pub fn render(&self) -> Option<String> {
        match self {
            ArgRef::QueryParams => Some("params".to_string()),
            ArgRef::Parameter(path) => Some(format!("variables.{}", camel_case(path))),
            ArgRef::Payload(path) | ArgRef::Response(path) => {
                Some(format!("data.{}", camel_case(path)))
            }
            ArgRef::Unresolvable(_) => None,
        }
    }
}

/// One parsed `x-invalidate-query-key` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationDirective {
    pub key: String,
    /// `None` for the bare form.
    pub args: Option<Vec<String>>,
}

fn is_key_literal(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '[' | ']'))
}

impl InvalidationDirective {
    /// Parse `KEY` or `KEY(arg, ...)`; `None` when the entry matches neither form.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.find('(') {
            Some(open) => {
                let inner = raw[open + 1..].strip_suffix(')')?;
                let key = raw[..open].trim();
                if !is_key_literal(key) || inner.contains(['(', ')']) {
                    return None;
                }
                let args = inner
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect();
                Some(Self {
                    key: key.to_string(),
                    args: Some(args),
                })
            }
            None if is_key_literal(raw) => Some(Self {
                key: raw.to_string(),
                args: None,
            }),
            None => None,
        }
    }
}

/// GET routes by their `x-query-key`, mapped to their key constant name.
#[derive(Debug, Clone, Default)]
pub struct QueryKeyIndex {
    targets: BTreeMap<String, String>,
}

impl QueryKeyIndex {
    pub fn build(routes: &[ParsedRoute]) -> Self {
        let mut targets = BTreeMap::new();
        for route in routes.iter().filter(|r| r.method == HttpMethod::Get) {
            let Some(key) = &route.extensions.query_key else {
                continue;
            };
            if targets.contains_key(key) {
                tracing::warn!(
                    "x-query-key '{}' is declared more than once, keeping the first ({} ignored)",
                    key,
                    route.path
                );
                continue;
            }
            targets.insert(key.clone(), key_constant_name(route.method, &route.path));
        }
        Self { targets }
    }

    /// Key constant name of the GET route declaring `query_key`.
    pub fn constant_for(&self, query_key: &str) -> Option<&str> {
        self.targets.get(query_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Resolve the route's invalidation directives to call expressions.
///
/// Malformed entries, unknown targets and unresolvable arguments are dropped
/// with a warning.
pub fn resolve_invalidations(route: &ParsedRoute, index: &QueryKeyIndex) -> Vec<String> {
    let mut resolved = Vec::new();

    for raw in &route.extensions.invalidate_query_key {
        let Some(directive) = InvalidationDirective::parse(raw) else {
            tracing::warn!(
                route = %route.route_name.usage,
                "ignoring malformed x-invalidate-query-key entry '{}'",
                raw
            );
            continue;
        };

        let Some(target) = index.constant_for(&directive.key) else {
            tracing::warn!(
                route = %route.route_name.usage,
                "x-invalidate-query-key '{}' does not match any GET route's x-query-key",
                directive.key
            );
            continue;
        };

        let args: Vec<String> = directive
            .args
            .iter()
            .flatten()
            .filter_map(|token| {
                let arg = ArgRef::classify(token);
                let rendered = arg.render();
                if rendered.is_none() {
                    tracing::warn!(
                        route = %route.route_name.usage,
                        "dropping unresolvable argument '{}' of '{}'",
                        token,
                        directive.key
                    );
                }
                rendered
            })
            .collect();

        resolved.push(format!("{target}({})", args.join(", ")));
    }

    resolved
}
