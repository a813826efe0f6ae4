use crate::alias::AliasMap;
use crate::config::output::ArtifactCategory;
use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{AutogenError, Result};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "swagger-autogen.toml";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub uri: Option<String>,
    pub format: Option<OutputFormat>,
    pub create_schema: Option<bool>,
    pub alias_depth: Option<usize>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/swagger-autogen/config.toml)
/// 3. Project config (nearest swagger-autogen.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let mut prov = ProvenanceMap::defaults();
    let mut loaded_files = Vec::new();

    // 1. Built-in defaults
    let mut config = ResolvedConfig::defaults(working_dir.to_path_buf());

    // 2. User config
    if let Some(user_config_path) = find_user_config() {
        if user_config_path.exists() {
            let file_config = load_file_config(&user_config_path, "user")?;
            apply_file_config(
                &mut config,
                &file_config,
                Source::UserConfig(user_config_path.clone()),
                &mut prov,
            )?;
            loaded_files.push(user_config_path);
        }
    }

    // 3. Project config (walk up from working_dir)
    if let Some(project_config_path) = find_project_config(working_dir) {
        let file_config = load_file_config(&project_config_path, "project")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(project_config_path.clone()),
            &mut prov,
        )?;
        loaded_files.push(project_config_path);
    }

    // 4. Environment variables
    apply_env_vars(&mut config, &mut prov);

    // 5. CLI overrides
    apply_cli_overrides(&mut config, cli, &mut prov);

    tracing::debug!(files = loaded_files.len(), "configuration resolved");

    config.provenance = prov;
    config.loaded_files = loaded_files;

    Ok(config)
}

fn load_file_config(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        AutogenError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    let mut file_config = FileConfig::from_toml(&content)
        .map_err(|e| AutogenError::Config(format!("Invalid {layer} config: {e}")))?;
    file_config.migrate_legacy();
    Ok(file_config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("swagger-autogen").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    // Source document
    if let Some(ref uri) = file.source.uri {
        config.uri = Some(uri.clone());
        prov.set("source.uri", source.clone());
    }
    if let Some(ref username) = file.source.username {
        config.username = Some(username.clone());
        prov.set("source.username", source.clone());
    }
    if let Some(ref password) = file.source.password {
        config.password = Some(password.clone());
        prov.set("source.password", source.clone());
    }

    // Generation
    if let Some(create_schema) = file.generate.create_schema {
        config.create_schema = create_schema;
        prov.set("generate.create_schema", source.clone());
    }
    if let Some(ref template) = file.generate.project_template {
        config.project_template = Some(template.clone());
        prov.set("generate.project_template", source.clone());
    }
    if let Some(ref format) = file.generate.format {
        config.format = format
            .parse()
            .map_err(|e| AutogenError::Config(format!("{e} (in {source})")))?;
        prov.set("generate.format", source.clone());
    }

    // Aliases: a map replaces the previous one as a whole
    if !file.alias.map.is_empty() {
        let mut aliases = AliasMap::new(&config.working_dir);
        for (prefix, root) in &file.alias.map {
            aliases.insert(prefix.clone(), root.clone());
        }
        config.aliases = aliases;
        prov.set("alias.map", source.clone());
    }
    if let Some(depth) = file.alias.depth {
        config.alias_depth = depth;
        prov.set("alias.depth", source.clone());
    }

    // Artifact paths
    for (key, path) in &file.paths {
        let category: ArtifactCategory = key
            .parse()
            .map_err(|e| AutogenError::Config(format!("{e} (in [paths] of {source})")))?;
        config.paths.insert(category, path.clone());
        prov.set_path(category, source.clone());
    }

    Ok(())
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) {
    if let Ok(val) = std::env::var("SWAGGER_AUTOGEN_URI") {
        config.uri = Some(val);
        prov.set("source.uri", Source::EnvVar("SWAGGER_AUTOGEN_URI".into()));
    }
    if let Ok(val) = std::env::var("SWAGGER_AUTOGEN_FORMAT") {
        match val.parse::<OutputFormat>() {
            Ok(format) => {
                config.format = format;
                prov.set(
                    "generate.format",
                    Source::EnvVar("SWAGGER_AUTOGEN_FORMAT".into()),
                );
            }
            Err(e) => tracing::warn!("ignoring SWAGGER_AUTOGEN_FORMAT: {e}"),
        }
    }
    if let Ok(val) = std::env::var("SWAGGER_AUTOGEN_CREATE_SCHEMA") {
        config.create_schema = env_flag(&val);
        prov.set(
            "generate.create_schema",
            Source::EnvVar("SWAGGER_AUTOGEN_CREATE_SCHEMA".into()),
        );
    }
    if let Ok(val) = std::env::var("SWAGGER_AUTOGEN_ALIAS_DEPTH") {
        if let Ok(depth) = val.parse::<usize>() {
            config.alias_depth = depth;
            prov.set(
                "alias.depth",
                Source::EnvVar("SWAGGER_AUTOGEN_ALIAS_DEPTH".into()),
            );
        }
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(ref uri) = cli.uri {
        config.uri = Some(uri.clone());
        prov.set("source.uri", Source::CliFlag("<document>".into()));
    }
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("generate.format", Source::CliFlag("--format".into()));
    }
    if let Some(create_schema) = cli.create_schema {
        config.create_schema = create_schema;
        prov.set(
            "generate.create_schema",
            Source::CliFlag("--no-schema".into()),
        );
    }
    if let Some(depth) = cli.alias_depth {
        config.alias_depth = depth;
        prov.set("alias.depth", Source::CliFlag("--alias-depth".into()));
    }
}
