use crate::alias::{derive_alias, normalize, resolve_import_path, AliasMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const MODULE_NAME_PLACEHOLDER: &str = "{moduleName}";
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Kinds of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactCategory {
    Dto,
    Api,
    ApiInstance,
    Queries,
    Mutations,
    Schema,
    ApiUtils,
    StreamUtils,
    TypeGuards,
    StreamHandlers,
}

impl ArtifactCategory {
    pub const ALL: [ArtifactCategory; 10] = [
        ArtifactCategory::Dto,
        ArtifactCategory::Api,
        ArtifactCategory::ApiInstance,
        ArtifactCategory::Queries,
        ArtifactCategory::Mutations,
        ArtifactCategory::Schema,
        ArtifactCategory::ApiUtils,
        ArtifactCategory::StreamUtils,
        ArtifactCategory::TypeGuards,
        ArtifactCategory::StreamHandlers,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ArtifactCategory::Dto => "dto",
            ArtifactCategory::Api => "api",
            ArtifactCategory::ApiInstance => "apiInstance",
            ArtifactCategory::Queries => "queries",
            ArtifactCategory::Mutations => "mutations",
            ArtifactCategory::Schema => "schema",
            ArtifactCategory::ApiUtils => "apiUtils",
            ArtifactCategory::StreamUtils => "streamUtils",
            ArtifactCategory::TypeGuards => "typeGuards",
            ArtifactCategory::StreamHandlers => "streamHandlers",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            ArtifactCategory::Dto => "src/shared/api/dto.ts",
            ArtifactCategory::Api => "src/entities/{moduleName}/api/index.ts",
            ArtifactCategory::ApiInstance => "src/entities/{moduleName}/api/instance.ts",
            ArtifactCategory::Queries => "src/entities/{moduleName}/api/queries.ts",
            ArtifactCategory::Mutations => "src/entities/{moduleName}/api/mutations.ts",
            ArtifactCategory::Schema => "src/shared/api/schema.gen.ts",
            ArtifactCategory::ApiUtils => "src/shared/api/utils.gen.ts",
            ArtifactCategory::StreamUtils => "src/shared/api/stream.gen.ts",
            ArtifactCategory::TypeGuards => "src/shared/api/type-guards.gen.ts",
            ArtifactCategory::StreamHandlers => "src/entities/{moduleName}/api/stream-handlers",
        }
    }
}

impl std::fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ArtifactCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactCategory::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown artifact category: {s}"))
    }
}

/// User-supplied, partial output settings.
#[derive(Debug, Clone)]
pub struct OutputInput {
    pub overrides: BTreeMap<ArtifactCategory, String>,
    pub aliases: AliasMap,
    pub max_depth: usize,
}

impl OutputInput {
    pub fn new(cwd: &Path) -> Self {
        Self {
            overrides: BTreeMap::new(),
            aliases: AliasMap::with_defaults(cwd),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Where one artifact category is written, and how other files import it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactPath {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub alias: String,
}

impl ArtifactPath {
    /// Substitute the `{moduleName}` placeholder.
    pub fn for_module(&self, module_name: &str) -> ArtifactPath {
        let absolute = self.absolute_path.to_string_lossy();
        ArtifactPath {
            relative_path: self.relative_path.replace(MODULE_NAME_PLACEHOLDER, module_name),
            absolute_path: PathBuf::from(absolute.replace(MODULE_NAME_PLACEHOLDER, module_name)),
            alias: self.alias.replace(MODULE_NAME_PLACEHOLDER, module_name),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    paths: BTreeMap<ArtifactCategory, ArtifactPath>,
    pub aliases: AliasMap,
    pub max_depth: usize,
}

impl OutputConfig {
    /// Only built by `resolve_output_config`, which fills every category.
    pub fn get(&self, category: ArtifactCategory) -> &ArtifactPath {
        &self.paths[&category]
    }

    pub fn paths(&self) -> impl Iterator<Item = (ArtifactCategory, &ArtifactPath)> {
        self.paths.iter().map(|(category, artifact)| (*category, artifact))
    }

    /// Import specifier used inside `from` to reach `to`, both for `module_name`.
    pub fn import_path(
        &self,
        from: ArtifactCategory,
        to: ArtifactCategory,
        module_name: &str,
    ) -> String {
        let from = self.get(from).for_module(module_name);
        let to = self.get(to).for_module(module_name);
        resolve_import_path(
            Path::new(&from.relative_path),
            &to.alias,
            &self.aliases,
            self.max_depth,
        )
    }
}

/// Resolve every artifact category to its output location.
pub fn resolve_output_config(input: OutputInput, cwd: &Path) -> OutputConfig {
    let paths: BTreeMap<_, _> = ArtifactCategory::ALL
        .into_iter()
        .map(|category| {
            let relative = input
                .overrides
                .get(&category)
                .cloned()
                .unwrap_or_else(|| category.default_path().to_string());
            let artifact = ArtifactPath {
                absolute_path: normalize(&cwd.join(&relative)),
                alias: derive_alias(&relative, &input.aliases),
                relative_path: relative,
            };
            (category, artifact)
        })
        .collect();

    for (category, artifact) in &paths {
        tracing::info!(
            "{:<15} {:<48} {}",
            category.key(),
            artifact.relative_path,
            artifact.alias
        );
    }

    OutputConfig {
        paths,
        aliases: input.aliases,
        max_depth: input.max_depth,
    }
}
