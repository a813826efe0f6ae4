use crate::cli::resolve_working_dir;
use crate::config::output::{resolve_output_config, ArtifactCategory, OutputConfig};
use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{AutogenError, Result};
use crate::output::json::{
    write_routes_json, Metadata, ModuleImports, ModuleReport, RouteReport, RoutesOutput,
};
use crate::output::text::write_routes_text;
use crate::output::OutputFormat;
use crate::parse::openapi::parse_document;
use crate::query::build_query_config;
use crate::query::invalidate::QueryKeyIndex;
use crate::route::{build_route_config, ModuleConfig, ParsedRoute};
use crate::route::schema::SchemaDescriptor;
use clap::Args;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct RoutesArgs {
    /// API description document (defaults to `source.uri` from the config)
    pub document: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Only report routes of this module
    #[arg(long)]
    pub module: Option<String>,

    /// Leave validation schema expressions out of the report
    #[arg(long)]
    pub no_schema: bool,

    /// Maximum `..` steps before an import keeps its alias
    #[arg(long)]
    pub alias_depth: Option<usize>,

    /// Working directory for config lookup and output paths (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub fn run(args: &RoutesArgs) -> Result<()> {
    let start = Instant::now();
    let working_dir = resolve_working_dir(&args.path)?;

    let cli = CliOverrides {
        uri: args.document.as_ref().map(|p| p.display().to_string()),
        format: args.format,
        create_schema: args.no_schema.then_some(false),
        alias_depth: args.alias_depth,
    };
    let config = resolve_config(&working_dir, &cli)?;
    let output = build_report(&config, args.module.as_deref(), start)?;

    let mut stdout = std::io::stdout().lock();
    match config.format {
        OutputFormat::Json => write_routes_json(&mut stdout, &output)?,
        OutputFormat::Text => write_routes_text(&mut stdout, &output)?,
    }
    Ok(())
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Parse the configured document and derive the configuration of every route.
pub fn build_report(
    config: &ResolvedConfig,
    module: Option<&str>,
    start: Instant,
) -> Result<RoutesOutput> {
    let uri = config.uri.as_deref().ok_or(AutogenError::NoSource)?;
    if is_remote(uri) {
        return Err(AutogenError::RemoteSource {
            uri: uri.to_string(),
        });
    }

    let document_path = config.working_dir.join(uri);
    let document = parse_document(&document_path)?;
    if document.routes.is_empty() {
        return Err(AutogenError::NoRoutes {
            path: document_path,
        });
    }

    let output_config = resolve_output_config(config.output_input(), &config.working_dir);
    let index = QueryKeyIndex::build(&document.routes);

    let routes: Vec<RouteReport> = document
        .routes
        .par_iter()
        .filter(|route| module.map_or(true, |m| route.module_name == m))
        .map(|route| derive_route(route, &index, config.create_schema))
        .collect();

    let module_names: BTreeSet<&str> = routes.iter().map(|r| r.module.as_str()).collect();
    let modules: Vec<ModuleReport> = module_names
        .into_iter()
        .map(|name| module_report(name, &output_config))
        .collect();

    tracing::info!(
        routes = routes.len(),
        modules = modules.len(),
        "derived route configuration"
    );

    Ok(RoutesOutput {
        metadata: Metadata {
            document: document_path,
            title: document.title,
            version: document.version,
            route_count: routes.len(),
            module_count: modules.len(),
            query_key_count: index.len(),
            create_schema: config.create_schema,
            project_template: config.project_template.clone(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        },
        modules,
        routes,
    })
}

/// Route and hook configuration of a single route.
pub fn derive_route(route: &ParsedRoute, index: &QueryKeyIndex, create_schema: bool) -> RouteReport {
    let mut route_config = build_route_config(route);
    let query_config = build_query_config(route, &route_config, index);

    if !create_schema {
        route_config.request.schema = SchemaDescriptor::default();
        route_config.response.schema = SchemaDescriptor::default();
    }

    RouteReport {
        method: route.method,
        path: route.path.clone(),
        module: route.module_name.clone(),
        route_name: route.route_name.clone(),
        route: route_config,
        query: query_config,
    }
}

fn module_report(name: &str, output: &OutputConfig) -> ModuleReport {
    use ArtifactCategory::*;

    let paths = ArtifactCategory::ALL
        .into_iter()
        .map(|category| (category, output.get(category).for_module(name)))
        .collect();

    ModuleReport {
        name: name.to_string(),
        config: ModuleConfig::new(name),
        paths,
        imports: ModuleImports {
            api_to_dto: output.import_path(Api, Dto, name),
            api_to_instance: output.import_path(Api, ApiInstance, name),
            queries_to_api: output.import_path(Queries, Api, name),
            mutations_to_api: output.import_path(Mutations, Api, name),
            schema_to_dto: output.import_path(Schema, Dto, name),
        },
    }
}
