//! Data-fetching hook configuration: cache keys, hook names, invalidation and
//! cache timings of a route.

pub mod duration;
pub mod invalidate;
pub mod keys;

use crate::casing::pascal_case;
use crate::route::builder::RouteConfig;
use crate::route::model::{DurationLiteral, ParsedRoute};
use duration::{parse_duration, DurationExpr};
use invalidate::{resolve_invalidations, QueryKeyIndex};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TanstackQueryConfig {
    pub query: QueryHookConfig,
    pub mutation: MutationHookConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_time: Option<DurationExpr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gc_time: Option<DurationExpr>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHookConfig {
    /// Required request arguments joined with `, `.
    pub key_args: String,
    pub key_constant_name: String,
    pub key_constant_function: String,
    pub hook_name: String,
    pub suspense_hook_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationHookConfig {
    pub key_constant_name: String,
    pub key_constant_content: String,
    pub hook_name: String,
    pub invalidate_query_key: Vec<String>,
}

type Step = fn(&ParsedRoute, &QueryKeyIndex, TanstackQueryConfig) -> TanstackQueryConfig;

const STEPS: [Step; 3] = [set_invalidate_query_key, set_stale_time, set_gc_time];

/// Build the hook configuration of a route from its request configuration.
///
/// `index` maps `x-query-key` values of every GET route in the document and is
/// built once per document.
pub fn build_query_config(
    route: &ParsedRoute,
    route_config: &RouteConfig,
    index: &QueryKeyIndex,
) -> TanstackQueryConfig {
    let hook_base = pascal_case(&route.route_name.usage);
    let constant_name = keys::key_constant_name(route.method, &route.path);
    let required = &route_config.request.parameters;

    let initial = TanstackQueryConfig {
        query: QueryHookConfig {
            key_args: required.arguments.required.join(", "),
            key_constant_name: constant_name.clone(),
            key_constant_function: keys::query_key_function(route, &required.signatures.required),
            hook_name: format!("use{hook_base}Query"),
            suspense_hook_name: format!("use{hook_base}SuspenseQuery"),
        },
        mutation: MutationHookConfig {
            key_constant_name: constant_name,
            key_constant_content: keys::mutation_key_content(&route.path),
            hook_name: format!("use{hook_base}Mutation"),
            invalidate_query_key: Vec::new(),
        },
        stale_time: None,
        gc_time: None,
    };

    STEPS
        .iter()
        .fold(initial, |config, step| step(route, index, config))
}

fn set_invalidate_query_key(
    route: &ParsedRoute,
    index: &QueryKeyIndex,
    mut config: TanstackQueryConfig,
) -> TanstackQueryConfig {
    config.mutation.invalidate_query_key = resolve_invalidations(route, index);
    config
}

fn duration_extension(
    route: &ParsedRoute,
    name: &str,
    value: Option<&DurationLiteral>,
) -> Option<DurationExpr> {
    let value = value?;
    let parsed = parse_duration(value);
    if parsed.is_none() {
        tracing::warn!(
            route = %route.route_name.usage,
            "ignoring {} value {:?}: expected a number, Infinity, static or a duration like 1h30m",
            name,
            value
        );
    }
    parsed
}

fn set_stale_time(
    route: &ParsedRoute,
    _index: &QueryKeyIndex,
    mut config: TanstackQueryConfig,
) -> TanstackQueryConfig {
    config.stale_time =
        duration_extension(route, "x-staleTime", route.extensions.stale_time.as_ref());
    config
}

fn set_gc_time(
    route: &ParsedRoute,
    _index: &QueryKeyIndex,
    mut config: TanstackQueryConfig,
) -> TanstackQueryConfig {
    config.gc_time = duration_extension(route, "x-gcTime", route.extensions.gc_time.as_ref());
    config
}
