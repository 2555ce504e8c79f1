use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use include_dir::{include_dir, Dir, DirEntry};
use walkdir::WalkDir;

use crate::config::rules::TemplateType;
use crate::error::{Result, ScaffoldError};

static BUILTIN_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// One node of a bundle's file tree, relative to the bundle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleEntry {
    Dir(PathBuf),
    File { path: PathBuf, content: Vec<u8> },
}

impl BundleEntry {
    pub fn path(&self) -> &Path {
        match self {
            BundleEntry::Dir(path) => path,
            BundleEntry::File { path, .. } => path,
        }
    }
}

/// Read-only source of template bundles, keyed by template type and bundle name.
pub trait TemplateStore {
    /// Names of the bundles stored for `kind`, sorted. An absent type yields none.
    fn bundle_names(&self, kind: TemplateType) -> Result<Vec<String>>;

    /// Entries of one bundle sorted by relative path, or `None` if it does not exist.
    fn bundle_entries(&self, kind: TemplateType, bundle: &str) -> Result<Option<Vec<BundleEntry>>>;

    /// Where the bundles come from, for messages.
    fn describe(&self) -> String;
}

/// Bundle names address a single directory level; anything else cannot exist.
fn is_plain_name(bundle: &str) -> bool {
    let mut components = Path::new(bundle).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn sort_entries(entries: &mut [BundleEntry]) {
    entries.sort_by(|a, b| a.path().cmp(b.path()));
}

/// Bundles laid out on disk as `<root>/<type dir>/<bundle>/...`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for FsStore {
    fn bundle_names(&self, kind: TemplateType) -> Result<Vec<String>> {
        let type_dir = self.root.join(kind.rule().store_dir);
        if !type_dir.is_dir() {
            return Ok(Vec::new());
        }

        let read_err = |e| ScaffoldError::Io {
            context: format!("reading {}", type_dir.display()),
            source: e,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&type_dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if !entry.file_type().map_err(read_err)?.is_dir() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn bundle_entries(&self, kind: TemplateType, bundle: &str) -> Result<Option<Vec<BundleEntry>>> {
        if !is_plain_name(bundle) {
            return Ok(None);
        }
        let bundle_dir = self.root.join(kind.rule().store_dir).join(bundle);
        if !bundle_dir.is_dir() {
            return Ok(None);
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&bundle_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ScaffoldError::Io {
                context: format!("walking {}", bundle_dir.display()),
                source: e.into(),
            })?;
            let rel = entry
                .path()
                .strip_prefix(&bundle_dir)
                .expect("entry must be under bundle_dir")
                .to_path_buf();

            if entry.file_type().is_dir() {
                entries.push(BundleEntry::Dir(rel));
            } else {
                let content = std::fs::read(entry.path()).map_err(|e| ScaffoldError::Io {
                    context: format!("reading {}", entry.path().display()),
                    source: e,
                })?;
                entries.push(BundleEntry::File { path: rel, content });
            }
        }
        sort_entries(&mut entries);
        Ok(Some(entries))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// The bundles shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStore;

impl BuiltinStore {
    fn collect(dir: &Dir<'_>, base: &Path, out: &mut Vec<BundleEntry>) {
        for entry in dir.entries() {
            let rel = entry
                .path()
                .strip_prefix(base)
                .expect("entry must be under bundle dir")
                .to_path_buf();
            match entry {
                DirEntry::Dir(sub) => {
                    out.push(BundleEntry::Dir(rel));
                    Self::collect(sub, base, out);
                }
                DirEntry::File(file) => out.push(BundleEntry::File {
                    path: rel,
                    content: file.contents().to_vec(),
                }),
            }
        }
    }
}

impl TemplateStore for BuiltinStore {
    fn bundle_names(&self, kind: TemplateType) -> Result<Vec<String>> {
        let Some(type_dir) = BUILTIN_TEMPLATES.get_dir(kind.rule().store_dir) else {
            return Ok(Vec::new());
        };
        let mut names: Vec<String> = type_dir
            .dirs()
            .filter_map(|d| d.path().file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    fn bundle_entries(&self, kind: TemplateType, bundle: &str) -> Result<Option<Vec<BundleEntry>>> {
        if !is_plain_name(bundle) {
            return Ok(None);
        }
        let path = Path::new(kind.rule().store_dir).join(bundle);
        let Some(bundle_dir) = BUILTIN_TEMPLATES.get_dir(&path) else {
            return Ok(None);
        };

        let mut entries = Vec::new();
        Self::collect(bundle_dir, bundle_dir.path(), &mut entries);
        sort_entries(&mut entries);
        Ok(Some(entries))
    }

    fn describe(&self) -> String {
        "built-in templates".to_string()
    }
}

/// Bundles held in memory; directories are implied by file paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bundles: BTreeMap<(TemplateType, String), BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryStore::insert_file`].
    pub fn with_file(
        mut self,
        kind: TemplateType,
        bundle: &str,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert_file(kind, bundle, path, content);
        self
    }

    pub fn insert_file(
        &mut self,
        kind: TemplateType,
        bundle: &str,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
    ) {
        self.bundles
            .entry((kind, bundle.to_string()))
            .or_default()
            .insert(path.into(), content.into());
    }
}

impl TemplateStore for MemoryStore {
    fn bundle_names(&self, kind: TemplateType) -> Result<Vec<String>> {
        Ok(self
            .bundles
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect())
    }

    fn bundle_entries(&self, kind: TemplateType, bundle: &str) -> Result<Option<Vec<BundleEntry>>> {
        let Some(files) = self.bundles.get(&(kind, bundle.to_string())) else {
            return Ok(None);
        };

        let dirs: BTreeSet<PathBuf> = files
            .keys()
            .flat_map(|path| path.ancestors().skip(1))
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();

        let mut entries: Vec<BundleEntry> = dirs.into_iter().map(BundleEntry::Dir).collect();
        entries.extend(files.iter().map(|(path, content)| BundleEntry::File {
            path: path.clone(),
            content: content.clone(),
        }));
        sort_entries(&mut entries);
        Ok(Some(entries))
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
