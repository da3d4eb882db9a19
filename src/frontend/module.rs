//! Module discovery and loading
//!
//! A module path `dir/name` names every file in `dir` that starts with `:arf` and declares
//! `module name` in its header. All of those files are parsed into one [`Module`].
//!
//! Reading files goes through the [`ModuleLoader`] trait so the cache and the analyzer can run
//! against the filesystem ([`FsLoader`]) or against files held in memory ([`MemoryLoader`]).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arf_core::lang::punctuation;
use arf_core::validate;

use super::ast::Module;
use super::config::FrontendConfig;
use super::diagnostics::{Diagnostics, FrontendError};
use super::parser::{self, ParseMode};
use super::source::SourceText;

// ============================================================================
// Discovery
// ============================================================================

/// Return the module name a file declares, or `None` if it is not a module file.
///
/// The first line must be exactly `:arf`. The header is scanned for a line of exactly two words,
/// `module <name>`; a line starting with `---` ends the search.
pub fn scan_module_name(text: &str) -> Option<String> {
    let mut lines = text.lines();
    if lines.next()?.trim_end() != punctuation::MAGIC {
        return None;
    }

    for line in lines {
        if line.starts_with("---") {
            return None;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let ["module", name] = fields.as_slice() {
            return Some((*name).to_string());
        }
    }
    None
}

/// Split a module path into its directory and its (validated) name.
///
/// ## Errors
/// [`FrontendError::InvalidModuleName`] if the last component is not a valid name.
pub fn split_module_path(path: &Path) -> Result<(PathBuf, String), FrontendError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !validate::is_valid_name(&name) {
        return Err(FrontendError::InvalidModuleName { name });
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}

// ============================================================================
// Loaders
// ============================================================================

/// Source of module files.
pub trait ModuleLoader {
    /// Return every file of module `name` in `dir`, in a stable order.
    ///
    /// ## Errors
    /// [`FrontendError::Io`] if `dir` cannot be listed or a module file cannot be read.
    fn find_sources(&self, dir: &Path, name: &str) -> Result<Vec<Arc<SourceText>>, FrontendError>;

    /// Normalize a module directory so equal modules get equal paths.
    fn canonicalize(&self, dir: &Path) -> PathBuf {
        dir.to_path_buf()
    }
}

/// Loads modules from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    config: FrontendConfig,
}

impl FsLoader {
    pub fn new(config: FrontendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }
}

impl ModuleLoader for FsLoader {
    fn find_sources(&self, dir: &Path, name: &str) -> Result<Vec<Arc<SourceText>>, FrontendError> {
        let io_error = |source| FrontendError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(err) => tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry"),
            }
        }
        paths.sort();

        let mut sources = Vec::new();
        for path in paths {
            if !path.is_file() || path.extension().is_none_or(|ext| ext != self.config.extension.as_str()) {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| FrontendError::Io {
                path: path.clone(),
                source,
            })?;
            if scan_module_name(&text).as_deref() == Some(name) {
                sources.push(Arc::new(SourceText::new(path, name, &text)));
            }
        }
        Ok(sources)
    }

    fn canonicalize(&self, dir: &Path) -> PathBuf {
        dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
    }
}

/// Loads modules from files held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    config: FrontendConfig,
    files: Vec<(PathBuf, String)>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and return the loader, for chaining.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.add_file(path, text);
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.push((path.into(), text.into()));
    }
}

impl ModuleLoader for MemoryLoader {
    fn find_sources(&self, dir: &Path, name: &str) -> Result<Vec<Arc<SourceText>>, FrontendError> {
        let mut files: Vec<_> = self
            .files
            .iter()
            .filter(|(path, _)| path.parent().is_some_and(|parent| parent == dir))
            .filter(|(path, _)| path.extension().is_some_and(|ext| ext == self.config.extension.as_str()))
            .filter(|(_, text)| scan_module_name(text).as_deref() == Some(name))
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(files
            .into_iter()
            .map(|(path, text)| Arc::new(SourceText::new(path.clone(), name, text)))
            .collect())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Cache key of a module: its normalized directory joined with its name.
pub fn module_key(loader: &dyn ModuleLoader, path: &Path) -> Result<PathBuf, FrontendError> {
    let (dir, name) = split_module_path(path)?;
    Ok(loader.canonicalize(&dir).join(name))
}

/// Parse every file of the module at `path` into one [`Module`].
///
/// A file that cannot be parsed at all (empty, or cut off inside its header) is reported as a
/// fatal diagnostic and loading continues with the next file.
///
/// ## Errors
/// - [`FrontendError::InvalidModuleName`] if the last path component is not a valid name.
/// - [`FrontendError::EmptyModule`] if no file declares the module.
/// - [`FrontendError::Io`] if the directory or a module file cannot be read.
#[tracing::instrument(skip_all, fields(path = %path.display(), ?mode))]
pub fn load_module(
    loader: &dyn ModuleLoader,
    path: &Path,
    mode: ParseMode,
    diagnostics: &mut Diagnostics,
) -> Result<Module, FrontendError> {
    let (dir, name) = split_module_path(path)?;
    let dir = loader.canonicalize(&dir);
    tracing::info!(module = %name, dir = %dir.display(), "parsing module");

    let sources = loader.find_sources(&dir, &name)?;
    if sources.is_empty() {
        return Err(FrontendError::EmptyModule { module: name });
    }

    let mut module = Module::new(name.as_str(), dir.join(&name));
    for source in &sources {
        tracing::info!(file = %source.path().display(), "found file");
        if let Err(err) = parser::parse_file(source, &mut module, mode, diagnostics) {
            diagnostics.fatal(&err);
        }
    }

    tracing::info!(
        module = %name,
        typedefs = module.typedefs.len(),
        datas = module.datas.len(),
        functions = module.functions.len(),
        "module parsed"
    );
    Ok(module)
}
