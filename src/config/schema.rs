use serde::Deserialize;
use std::collections::BTreeMap;

/// TOML-deserializable config file. All fields are Option for layered merging.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceFileConfig,
    #[serde(default)]
    pub generate: GenerateFileConfig,
    #[serde(default)]
    pub alias: AliasFileConfig,
    /// Artifact category key (`dto`, `apiInstance`, ...) to output path.
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SourceFileConfig {
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateFileConfig {
    #[serde(alias = "createSchema")]
    pub create_schema: Option<bool>,
    #[serde(alias = "projectTemplate")]
    pub project_template: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AliasFileConfig {
    /// Alias prefix to root directory, e.g. `"@" = "src"`.
    #[serde(default)]
    pub map: BTreeMap<String, String>,
    pub depth: Option<usize>,
}

impl FileConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Migrate legacy fields into the current schema in-place.
    pub fn migrate_legacy(&mut self) {
        // [paths].query / [paths].mutation were renamed to queries / mutations
        for (legacy, current) in [("query", "queries"), ("mutation", "mutations")] {
            if let Some(path) = self.paths.remove(legacy) {
                self.paths.entry(current.to_string()).or_insert(path);
            }
        }
    }
}
