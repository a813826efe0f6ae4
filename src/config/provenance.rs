use crate::config::output::ArtifactCategory;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Scalar settings tracked alongside the `paths.*` keys.
pub const SETTING_KEYS: [&str; 8] = [
    "source.uri",
    "source.username",
    "source.password",
    "generate.create_schema",
    "generate.project_template",
    "generate.format",
    "alias.map",
    "alias.depth",
];

fn path_key(category: ArtifactCategory) -> String {
    format!("paths.{}", category.key())
}

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(String),
    CliFlag(String),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({})", name),
            Source::CliFlag(name) => write!(f, "CLI flag ({})", name),
        }
    }
}

/// Tracks the source of each configuration value by dotted key.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceMap {
    entries: BTreeMap<String, Source>,
}

impl ProvenanceMap {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Every setting and artifact path attributed to the built-in defaults.
    pub fn defaults() -> Self {
        let mut map = Self::new();
        for key in SETTING_KEYS {
            map.set(key, Source::Default);
        }
        for category in ArtifactCategory::ALL {
            map.set_path(category, Source::Default);
        }
        map
    }

    pub fn set(&mut self, key: impl Into<String>, source: Source) {
        self.entries.insert(key.into(), source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.entries.get(key)
    }

    /// Return all entries sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&str, &Source)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    pub fn set_path(&mut self, category: ArtifactCategory, source: Source) {
        self.set(path_key(category), source);
    }

    pub fn path_source(&self, category: ArtifactCategory) -> Option<&Source> {
        self.get(&path_key(category))
    }

    /// Keys whose value no longer comes from the defaults.
    pub fn overridden(&self) -> impl Iterator<Item = (&str, &Source)> {
        self.entries
            .iter()
            .filter(|(_, source)| **source != Source::Default)
            .map(|(k, v)| (k.as_str(), v))
    }
}
