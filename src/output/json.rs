use crate::config::output::{ArtifactCategory, ArtifactPath};
use crate::errors::Result;
use crate::query::TanstackQueryConfig;
use crate::route::model::HttpMethod;
use crate::route::{ModuleConfig, RouteConfig, RouteNameInfo};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct RoutesOutput {
    pub metadata: Metadata,
    pub modules: Vec<ModuleReport>,
    pub routes: Vec<RouteReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub document: PathBuf,
    pub title: Option<String>,
    pub version: String,
    pub route_count: usize,
    pub module_count: usize,
    /// GET routes declaring an `x-query-key`.
    pub query_key_count: usize,
    pub create_schema: bool,
    pub project_template: Option<String>,
    pub elapsed_ms: u64,
}

/// Names, output files and cross-file imports of one module.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReport {
    pub name: String,
    #[serde(flatten)]
    pub config: ModuleConfig,
    pub paths: BTreeMap<ArtifactCategory, ArtifactPath>,
    pub imports: ModuleImports,
}

/// Import specifiers between the files of one module.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleImports {
    pub api_to_dto: String,
    pub api_to_instance: String,
    pub queries_to_api: String,
    pub mutations_to_api: String,
    pub schema_to_dto: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub method: HttpMethod,
    pub path: String,
    pub module: String,
    pub route_name: RouteNameInfo,
    pub route: RouteConfig,
    pub query: TanstackQueryConfig,
}

/// Write the derived route configuration as JSON.
pub fn write_routes_json<W: Write>(writer: &mut W, output: &RoutesOutput) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}
