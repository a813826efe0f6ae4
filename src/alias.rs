//! Import-path aliases (`@/shared/api/dto` style) and their conversion to
//! short relative imports.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Source-file extensions dropped from import specifiers.
const SOURCE_EXTENSIONS: [&str; 2] = ["tsx", "ts"];

/// Alias prefixes mapped to the directory they stand for.
///
/// Relative roots are anchored at `base`, the session working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasMap {
    #[serde(skip)]
    base: PathBuf,
    entries: BTreeMap<String, String>,
}

impl AliasMap {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            entries: BTreeMap::new(),
        }
    }

    /// The `{"@": "src"}` map generated projects start with.
    pub fn with_defaults(base: impl Into<PathBuf>) -> Self {
        Self::new(base).with_alias("@", "src")
    }

    pub fn with_alias(mut self, prefix: impl Into<String>, root: impl Into<String>) -> Self {
        self.insert(prefix, root);
        self
    }

    pub fn insert(&mut self, prefix: impl Into<String>, root: impl Into<String>) {
        let root = root.into();
        let root = root.trim_end_matches(['/', '\\']).to_string();
        self.entries.insert(prefix.into(), root);
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest prefix `p` with `specifier` starting with `p/`, and the rest.
    fn match_prefix<'a>(&self, specifier: &'a str) -> Option<(&str, &str, &'a str)> {
        self.entries
            .iter()
            .filter_map(|(prefix, root)| {
                specifier
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
                    .map(|rest| (prefix.as_str(), root.as_str(), rest))
            })
            .max_by_key(|(prefix, _, _)| prefix.len())
    }

    fn anchor(&self, path: &Path) -> PathBuf {
        normalize(&self.base.join(path))
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn strip_source_extension(path: &str) -> &str {
    SOURCE_EXTENSIONS
        .iter()
        .find_map(|ext| {
            path.strip_suffix(ext)
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(path)
}

fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Convert an aliased import into a path relative to `from_file`.
///
/// The alias form is kept when the target is not aliased, when no relative
/// path exists, or when reaching it takes more than `max_depth` `..` steps.
pub fn resolve_import_path(
    from_file: &Path,
    target: &str,
    aliases: &AliasMap,
    max_depth: usize,
) -> String {
    let Some((_, root, rest)) = aliases.match_prefix(target) else {
        return target.to_string();
    };

    let resolved = aliases.anchor(&Path::new(root).join(rest));
    let from = aliases.anchor(from_file);
    let from_dir = from.parent().unwrap_or(&from);

    let Some(relative) = pathdiff::diff_paths(&resolved, from_dir) else {
        return target.to_string();
    };

    let depth = relative
        .components()
        .filter(|c| matches!(c, Component::ParentDir))
        .count();
    if depth > max_depth {
        return target.to_string();
    }

    let relative = to_forward_slashes(&relative);
    let relative = strip_source_extension(&relative);
    if relative.starts_with('.') {
        relative.to_string()
    } else {
        format!("./{relative}")
    }
}

/// Alias form of an output file: `src/shared/api/dto.ts` -> `@/shared/api/dto`.
///
/// Picks the longest alias root that contains the path. Absolute paths under
/// the map's base are made relative to it first. Without a matching root the
/// extension-stripped path is returned.
pub fn derive_alias(output_path: &str, aliases: &AliasMap) -> String {
    let path = Path::new(output_path);
    let relative = if path.is_absolute() {
        path.strip_prefix(&aliases.base)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let relative = normalize(&relative);

    let best = aliases
        .entries
        .iter()
        .filter_map(|(prefix, root)| {
            let root = normalize(Path::new(root));
            relative
                .strip_prefix(&root)
                .ok()
                .map(|rest| (prefix, root.components().count(), rest.to_path_buf()))
        })
        .max_by_key(|(_, depth, _)| *depth);

    match best {
        Some((prefix, _, rest)) => {
            let rest = to_forward_slashes(&rest);
            let rest = strip_source_extension(&rest);
            if rest.is_empty() {
                prefix.clone()
            } else {
                format!("{prefix}/{rest}")
            }
        }
        None => strip_source_extension(&to_forward_slashes(Path::new(output_path))).to_string(),
    }
}
