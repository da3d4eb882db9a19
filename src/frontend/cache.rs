//! Cache of loaded modules
//!
//! Modules are stored by their module path (normalized directory joined with the module name),
//! either skimmed or fully parsed. Nothing is ever evicted: a cache lives as long as one analysis.
//! A skimmed entry is replaced when a full parse is asked for.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::ast::Module;
use super::diagnostics::{Diagnostics, FrontendError};
use super::module::{ModuleLoader, load_module, module_key};
use super::parser::ParseMode;

/// A cached module and how much of it was parsed.
#[derive(Debug, Clone)]
pub struct CacheItem {
    pub module: Rc<Module>,
    /// Only the header and section heads were parsed.
    pub skimmed: bool,
}

/// Loaded modules by module path.
#[derive(Debug, Default)]
pub struct ModuleCache {
    items: HashMap<PathBuf, CacheItem>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a module by its cache key (see [`module_key`]).
    pub fn get(&self, key: &Path) -> Option<&CacheItem> {
        self.items.get(key)
    }

    /// Store `module` under its own path, replacing any earlier entry.
    pub fn insert(&mut self, module: Module, skimmed: bool) -> Rc<Module> {
        let module = Rc::new(module);
        self.items.insert(
            module.path.clone(),
            CacheItem {
                module: Rc::clone(&module),
                skimmed,
            },
        );
        module
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the module at `path`, loading it on a miss.
    ///
    /// With `need_full`, a skimmed entry is parsed again in full and replaced.
    ///
    /// ## Errors
    /// Whatever [`load_module`] returns; nothing is cached in that case.
    #[tracing::instrument(skip_all, fields(path = %path.display(), need_full))]
    pub fn get_or_load(
        &mut self,
        loader: &dyn ModuleLoader,
        path: &Path,
        need_full: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<Rc<Module>, FrontendError> {
        let key = module_key(loader, path)?;
        match self.items.get(&key) {
            Some(item) if need_full && item.skimmed => {
                tracing::debug!(key = %key.display(), "reparsing skimmed module");
            }
            Some(item) => {
                tracing::debug!(key = %key.display(), skimmed = item.skimmed, "cache hit");
                return Ok(Rc::clone(&item.module));
            }
            None => tracing::debug!(key = %key.display(), "cache miss"),
        }

        let mode = if need_full { ParseMode::Full } else { ParseMode::Skim };
        let module = load_module(loader, path, mode, diagnostics)?;
        Ok(self.insert(module, !need_full))
    }
}
