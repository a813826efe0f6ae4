use crate::config::output::{resolve_output_config, ArtifactCategory, OutputConfig};
use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    // Loaded files
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    // Resolved settings
    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }
    let overridden = config.provenance.overridden().count();
    if overridden > 0 {
        writeln!(w, "  ({overridden} overridden)")?;
    }
    if config.username.is_some() || config.password.is_some() {
        writeln!(
            w,
            "  note: source.username/source.password are not used, remote documents are never fetched"
        )?;
    }
    writeln!(w)?;

    let output = resolve_output_config(config.output_input(), &config.working_dir);
    render_path_table(w, &output)
}

/// One row per artifact category: key, relative path and import alias.
pub fn render_path_table<W: Write>(w: &mut W, output: &OutputConfig) -> std::io::Result<()> {
    writeln!(w, "Output paths:")?;
    writeln!(w, "  {:<15} {:<48} alias", "category", "path")?;
    for (category, artifact) in output.paths() {
        writeln!(
            w,
            "  {:<15} {:<48} {}",
            category.key(),
            artifact.relative_path,
            artifact.alias
        )?;
    }
    Ok(())
}

/// Render `config explain <category>` output.
pub fn render_explain<W: Write>(
    w: &mut W,
    config: &ResolvedConfig,
    category: &str,
) -> std::io::Result<()> {
    let Ok(category) = category.parse::<ArtifactCategory>() else {
        writeln!(w, "Unknown artifact category: {}", category)?;
        let available: Vec<&str> = ArtifactCategory::ALL.iter().map(|c| c.key()).collect();
        writeln!(w, "Available categories: {}", available.join(", "))?;
        return Ok(());
    };

    let output = resolve_output_config(config.output_input(), &config.working_dir);
    let artifact = output.get(category);
    let key = format!("paths.{}", category.key());
    let source = config
        .provenance
        .path_source(category)
        .map_or("(unknown)".to_string(), |s| s.to_string());

    writeln!(w, "Artifact: {}", category)?;
    writeln!(w)?;
    writeln!(w, "  {}: {} <- {}", key, artifact.relative_path, source)?;
    writeln!(w, "  default: {}", category.default_path())?;
    writeln!(w, "  absolute: {}", artifact.absolute_path.display())?;
    writeln!(w, "  alias: {}", artifact.alias)?;

    Ok(())
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "source.uri" => config.uri.clone().unwrap_or_else(|| "(none)".to_string()),
        "source.username" => config
            .username
            .clone()
            .unwrap_or_else(|| "(none)".to_string()),
        "source.password" => config
            .password
            .as_ref()
            .map_or("(none)".to_string(), |_| "********".to_string()),
        "generate.create_schema" => config.create_schema.to_string(),
        "generate.project_template" => config
            .project_template
            .clone()
            .unwrap_or_else(|| "(none)".to_string()),
        "generate.format" => config.format.to_string(),
        "alias.map" => {
            let pairs: Vec<String> = config
                .aliases
                .entries()
                .iter()
                .map(|(prefix, root)| format!("{prefix} => {root}"))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
        "alias.depth" => config.alias_depth.to_string(),
        _ => match key
            .strip_prefix("paths.")
            .and_then(|k| k.parse::<ArtifactCategory>().ok())
        {
            Some(category) => config
                .paths
                .get(&category)
                .cloned()
                .unwrap_or_else(|| category.default_path().to_string()),
            None => "(unknown)".to_string(),
        },
    }
}
