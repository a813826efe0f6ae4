pub mod output;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::alias::AliasMap;
use crate::output::OutputFormat;
use output::{ArtifactCategory, OutputInput};
use provenance::ProvenanceMap;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Source document
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    // Generation
    pub create_schema: bool,
    pub project_template: Option<String>,
    pub format: OutputFormat,

    // Output placement
    pub working_dir: PathBuf,
    pub aliases: AliasMap,
    pub alias_depth: usize,
    pub paths: BTreeMap<ArtifactCategory, String>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Built-in defaults for a session rooted at `working_dir`.
    pub fn defaults(working_dir: PathBuf) -> Self {
        Self {
            uri: None,
            username: None,
            password: None,
            create_schema: true,
            project_template: None,
            format: OutputFormat::Json,
            aliases: AliasMap::with_defaults(&working_dir),
            alias_depth: output::DEFAULT_MAX_DEPTH,
            paths: BTreeMap::new(),
            working_dir,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }

    /// Partial output settings handed to `resolve_output_config`.
    pub fn output_input(&self) -> OutputInput {
        OutputInput {
            overrides: self.paths.clone(),
            aliases: self.aliases.clone(),
            max_depth: self.alias_depth,
        }
    }
}
