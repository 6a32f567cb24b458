//! File access and module specifier resolution.
//!
//! The extraction engine never touches the file system directly: it goes
//! through a [`ModuleHost`] (existence check and text read) and a
//! [`PathResolver`] (specifier to candidate path).

use std::io;
use std::path::{Component, Path, PathBuf};

use sinopia_carton::{CompactString, FxHashMap};

/// Extensions tried, in order, when a specifier omits one.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "mjs", "vue"];

/// File system accessor used by cross-module lookup.
pub trait ModuleHost {
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// [`ModuleHost`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsHost;

impl ModuleHost for OsHost {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory [`ModuleHost`].
///
/// Paths are normalized lexically (`.` and `..` folded) on insert and lookup.
#[derive(Debug, Default, Clone)]
pub struct MemoryHost {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), source.into());
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }
}

impl ModuleHost for MemoryHost {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Maps a module specifier to a candidate file path.
pub trait PathResolver {
    fn resolve(&self, specifier: &str, from_dir: &Path, host: &dyn ModuleHost) -> Option<PathBuf>;
}

/// Node-style resolver: relative specifiers, alias prefixes, extension
/// inference, then `index.*` fallback. Bare package specifiers are not
/// resolved.
#[derive(Debug, Clone)]
pub struct NodeResolver {
    /// Alias prefix to target directory, e.g. `@/` -> `/project/src/`.
    aliases: Vec<(CompactString, PathBuf)>,
    extensions: Vec<CompactString>,
}

impl Default for NodeResolver {
    fn default() -> Self {
        Self {
            aliases: Vec::new(),
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|e| CompactString::new(e))
                .collect(),
        }
    }
}

impl NodeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias prefix. Longer prefixes are tried first.
    pub fn with_alias(mut self, prefix: impl Into<CompactString>, target: impl Into<PathBuf>) -> Self {
        self.aliases.push((prefix.into(), target.into()));
        self.aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self
    }

    /// Replace the extension list (without leading dots).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let e: CompactString = e.into();
                CompactString::new(e.trim_start_matches('.'))
            })
            .collect();
        self
    }

    fn try_extensions(&self, base: &Path, host: &dyn ModuleHost) -> Option<PathBuf> {
        if base.extension().is_some() && host.exists(base) {
            return Some(base.to_path_buf());
        }

        for ext in &self.extensions {
            let mut candidate = base.as_os_str().to_owned();
            candidate.push(".");
            candidate.push(ext.as_str());
            let candidate = PathBuf::from(candidate);
            if host.exists(&candidate) {
                return Some(candidate);
            }
        }

        for ext in &self.extensions {
            let candidate = base.join(format!("index.{ext}"));
            if host.exists(&candidate) {
                return Some(candidate);
            }
        }

        None
    }
}

impl PathResolver for NodeResolver {
    fn resolve(&self, specifier: &str, from_dir: &Path, host: &dyn ModuleHost) -> Option<PathBuf> {
        if specifier.starts_with("./") || specifier.starts_with("../") || specifier == "." || specifier == ".." {
            let base = normalize_path(&from_dir.join(specifier));
            return self.try_extensions(&base, host);
        }

        if specifier.starts_with('/') {
            return self.try_extensions(&normalize_path(Path::new(specifier)), host);
        }

        for (prefix, target) in &self.aliases {
            if let Some(rest) = specifier.strip_prefix(prefix.as_str()) {
                let base = normalize_path(&target.join(rest.trim_start_matches('/')));
                if let Some(found) = self.try_extensions(&base, host) {
                    return Some(found);
                }
            }
        }

        None
    }
}

/// Fold `.` and `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        MemoryHost::new()
            .with_file("/app/src/events.ts", "")
            .with_file("/app/src/shared/index.ts", "")
            .with_file("/app/src/Button.vue", "")
            .with_file("/app/src/props.js", "")
    }

    #[test]
    fn test_relative_with_extension_inference() {
        let resolver = NodeResolver::new();
        let found = resolver.resolve("./events", Path::new("/app/src"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/events.ts")));
    }

    #[test]
    fn test_explicit_extension() {
        let resolver = NodeResolver::new();
        let found = resolver.resolve("./Button.vue", Path::new("/app/src"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/Button.vue")));
    }

    #[test]
    fn test_index_fallback_and_parent_dirs() {
        let resolver = NodeResolver::new();
        let found = resolver.resolve("../shared", Path::new("/app/src/components"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/shared/index.ts")));
    }

    #[test]
    fn test_bare_dot_specifiers_resolve_to_index() {
        let resolver = NodeResolver::new();
        let found = resolver.resolve("..", Path::new("/app/src/shared/nested"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/shared/index.ts")));

        let found = resolver.resolve(".", Path::new("/app/src/shared"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/shared/index.ts")));
    }

    #[test]
    fn test_alias_prefix() {
        let resolver = NodeResolver::new().with_alias("@/", "/app/src");
        let found = resolver.resolve("@/props", Path::new("/elsewhere"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/props.js")));

        let resolver = NodeResolver::new().with_alias("~", "/app/src");
        let found = resolver.resolve("~/shared", Path::new("/elsewhere"), &host());
        assert_eq!(found, Some(PathBuf::from("/app/src/shared/index.ts")));
    }

    #[test]
    fn test_bare_specifier_is_unresolved() {
        let resolver = NodeResolver::new();
        assert_eq!(resolver.resolve("vue", Path::new("/app/src"), &host()), None);
    }

    #[test]
    fn test_custom_extensions() {
        let resolver = NodeResolver::new().with_extensions([".js"]);
        assert_eq!(
            resolver.resolve("./events", Path::new("/app/src"), &host()),
            None
        );
        assert_eq!(
            resolver.resolve("./props", Path::new("/app/src"), &host()),
            Some(PathBuf::from("/app/src/props.js"))
        );
    }

    #[test]
    fn test_memory_host_normalizes() {
        let host = host();
        assert!(host.exists(Path::new("/app/src/./shared/../events.ts")));
        assert!(host.read_text(Path::new("/app/missing.ts")).is_err());
    }
}
