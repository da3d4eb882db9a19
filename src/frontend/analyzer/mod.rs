//! Semantic analysis
//!
//! Resolves the types named by a module's sections into a [`SemanticTree`]:
//! - a one-segment name is a typedef of the current module, else a built-in primitive;
//! - `module.name` is a typedef of the current module (when `module` is its own name) or of a
//!   required module whose last path component is `module`;
//! - a pointer resolves its pointee.
//!
//! Other modules are loaded through the [`ModuleCache`]: skimmed first to check that the name
//! exists, then in full to resolve it. The [`Checklist`] keeps cyclic typedefs from being entered
//! twice. Function bodies are not analyzed.
//!
//! Sections are keyed by module name, so within one run a name stands for one module path. A
//! second module with a name already taken is rejected, and a required module that fails to load
//! is reported once and not tried again.

mod checklist;
mod tree;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use arf_core::lang::primitives;
use indexmap::IndexMap;
use thiserror::Error;

pub use checklist::Checklist;
pub use tree::{
    ResolvedData, ResolvedFunction, ResolvedReceiver, ResolvedType, ResolvedTypeKind, ResolvedTypedef, SectionKey,
    SemanticTree,
};

use super::ast::{Data, Function, Identifier, Module, Type, TypeKind};
use super::cache::ModuleCache;
use super::diagnostics::{Diagnostics, FrontendError};
use super::module::ModuleLoader;

/// Why a type name did not resolve.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no type named \"{name}\"")]
    UnknownType { name: String },

    #[error("module \"{module}\" has no type named \"{name}\"")]
    UnknownForeignType { module: String, name: String },

    #[error("module \"{module}\" is not required by module \"{by}\"")]
    NotRequired { module: String, by: String },

    #[error("type name \"{trail}\" has too many segments, expected `name` or `module.name`")]
    TooManySegments { trail: String },

    #[error("module \"{module}\" at {} has the same name as the module at {}", path.display(), first.display())]
    NameClash {
        module: String,
        path: PathBuf,
        first: PathBuf,
    },

    /// The module was already reported as failing to load.
    #[error("module \"{module}\" could not be loaded")]
    Unavailable { module: String },

    #[error(transparent)]
    Load(#[from] FrontendError),
}

/// Analysis state for one run.
pub struct Analyzer<'a> {
    cache: &'a mut ModuleCache,
    loader: &'a dyn ModuleLoader,
    tree: SemanticTree,
    checklist: Checklist,
    /// Module path of every module name seen so far.
    modules: HashMap<String, PathBuf>,
    /// Required modules whose load failed.
    failed: HashSet<PathBuf>,
    diagnostics: Diagnostics,
}

impl<'a> Analyzer<'a> {
    pub fn new(cache: &'a mut ModuleCache, loader: &'a dyn ModuleLoader) -> Self {
        Self {
            cache,
            loader,
            tree: SemanticTree::new(),
            checklist: Checklist::new(),
            modules: HashMap::new(),
            failed: HashSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Resolve every typedef, data section and function signature of `module`.
    pub fn analyze_module(&mut self, module: &Rc<Module>) {
        self.modules
            .entry(module.name.clone())
            .or_insert_with(|| module.path.clone());
        for name in module.typedefs.keys() {
            self.analyze_typedef(module, name);
        }
        for data in module.datas.values() {
            let key = SectionKey::new(module.name.as_str(), data.name.as_str());
            if !self.tree.datas.contains_key(&key) {
                let resolved = self.resolve_data(module, data);
                self.tree.datas.insert(key, resolved);
            }
        }
        for function in module.functions.values() {
            self.analyze_function(module, function);
        }
    }

    pub fn finish(self) -> (SemanticTree, Diagnostics) {
        tracing::debug!(typedefs_checked = self.checklist.len(), modules = self.modules.len(), "analysis finished");
        (self.tree, self.diagnostics)
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn analyze_typedef(&mut self, module: &Rc<Module>, name: &str) {
        let key = SectionKey::new(module.name.as_str(), name);
        if self.tree.typedefs.contains_key(&key) || !self.checklist.check(key.clone()) {
            return;
        }
        let Some(typedef) = module.typedefs.get(name) else {
            return;
        };
        tracing::debug!(%key, "resolving typedef");

        let inherits = self.resolve_or_report(module, &typedef.inherits);
        let mut members = IndexMap::new();
        for member in typedef.members.values() {
            let resolved = self.resolve_data(module, member);
            members.insert(member.name.clone(), resolved);
        }

        self.tree.typedefs.insert(
            key.clone(),
            ResolvedTypedef {
                position: typedef.position.clone(),
                key,
                permissions: typedef.permissions,
                inherits,
                members,
            },
        );
    }

    fn analyze_function(&mut self, module: &Rc<Module>, function: &Function) {
        let key = SectionKey::new(module.name.as_str(), function.name.as_str());
        if self.tree.functions.contains_key(&key) {
            return;
        }

        let receiver = function.receiver.as_ref().map(|receiver| ResolvedReceiver {
            name: receiver.name.clone(),
            ty: self.resolve_or_report(module, &receiver.ty),
        });
        let mut inputs = IndexMap::new();
        for input in function.inputs.values() {
            inputs.insert(input.name.clone(), self.resolve_data(module, input));
        }
        let mut outputs = IndexMap::new();
        for output in function.outputs.values() {
            outputs.insert(output.name.clone(), self.resolve_data(module, output));
        }

        self.tree.functions.insert(
            key.clone(),
            ResolvedFunction {
                position: function.position.clone(),
                key,
                permissions: function.permissions,
                receiver,
                inputs,
                outputs,
            },
        );
    }

    fn resolve_data(&mut self, module: &Rc<Module>, data: &Data) -> ResolvedData {
        ResolvedData {
            position: data.position.clone(),
            name: data.name.clone(),
            permissions: data.permissions,
            ty: self.resolve_or_report(module, &data.ty),
            values: data.values.clone(),
            external: data.external,
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn resolve_or_report(&mut self, module: &Rc<Module>, ty: &Type) -> Option<ResolvedType> {
        match self.resolve_type(module, ty) {
            Ok(resolved) => Some(resolved),
            Err(ResolveError::Unavailable { .. }) => None,
            Err(err) => {
                self.diagnostics.error(err.to_string(), ty.position.clone());
                None
            }
        }
    }

    fn resolve_type(&mut self, module: &Rc<Module>, ty: &Type) -> Result<ResolvedType, ResolveError> {
        let mut resolved = match &ty.kind {
            TypeKind::Pointer { points_to, items } => ResolvedType::pointer(self.resolve_type(module, points_to)?, *items),
            TypeKind::Named(identifier) => self.resolve_name(module, identifier)?,
        };
        resolved.mutable = ty.mutable;
        Ok(resolved)
    }

    fn resolve_name(&mut self, module: &Rc<Module>, identifier: &Identifier) -> Result<ResolvedType, ResolveError> {
        match identifier.trail.as_slice() {
            [name] => self.resolve_local(module, name),
            [owner, name] if *owner == module.name => self.resolve_local(module, name),
            [owner, name] => self.resolve_foreign(module, owner, name),
            _ => Err(ResolveError::TooManySegments {
                trail: identifier.to_string(),
            }),
        }
    }

    fn resolve_local(&mut self, module: &Rc<Module>, name: &str) -> Result<ResolvedType, ResolveError> {
        if module.typedefs.contains_key(name) {
            self.analyze_typedef(module, name);
            return Ok(ResolvedType::typedef(SectionKey::new(module.name.as_str(), name)));
        }
        primitives::from_str(name)
            .map(ResolvedType::primitive)
            .ok_or_else(|| ResolveError::UnknownType { name: name.to_string() })
    }

    fn resolve_foreign(&mut self, module: &Rc<Module>, owner: &str, name: &str) -> Result<ResolvedType, ResolveError> {
        let path = required_module_path(module, owner).ok_or_else(|| ResolveError::NotRequired {
            module: owner.to_string(),
            by: module.name.clone(),
        })?;

        if self.failed.contains(&path) {
            return Err(ResolveError::Unavailable {
                module: owner.to_string(),
            });
        }

        // The full load below reports the module's problems; the skim only answers "does it exist".
        let mut scratch = Diagnostics::new();
        let skimmed = match self.cache.get_or_load(self.loader, &path, false, &mut scratch) {
            Ok(skimmed) => skimmed,
            Err(err) => {
                tracing::debug!(path = %path.display(), "required module failed to load");
                self.failed.insert(path);
                return Err(err.into());
            }
        };
        self.claim_name(&skimmed)?;
        if !skimmed.typedefs.contains_key(name) {
            return Err(ResolveError::UnknownForeignType {
                module: owner.to_string(),
                name: name.to_string(),
            });
        }

        let full = self.cache.get_or_load(self.loader, &path, true, &mut self.diagnostics)?;
        self.analyze_typedef(&full, name);
        Ok(ResolvedType::typedef(SectionKey::new(full.name.as_str(), name)))
    }

    /// Bind `module`'s name to its path, failing if another path already has it.
    fn claim_name(&mut self, module: &Module) -> Result<(), ResolveError> {
        match self.modules.get(&module.name) {
            Some(first) if *first != module.path => Err(ResolveError::NameClash {
                module: module.name.clone(),
                path: module.path.clone(),
                first: first.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.modules.insert(module.name.clone(), module.path.clone());
                Ok(())
            }
        }
    }
}

/// Path of the module `module` requires under the name `name`, relative to its directory.
fn required_module_path(module: &Module, name: &str) -> Option<PathBuf> {
    let dir = module.path.parent().unwrap_or(Path::new("."));
    module
        .requires
        .iter()
        .map(Path::new)
        .find(|require| require.file_name().is_some_and(|last| last == name))
        .map(|require| dir.join(require))
}

/// Load the module at `module_path` in full and resolve it.
///
/// Diagnostics of loading and analysis are appended to `diagnostics`.
///
/// ## Errors
/// Returns the [`FrontendError`] that kept the module itself from loading. Problems in required
/// modules are reported as diagnostics.
#[tracing::instrument(skip_all, fields(path = %module_path.display()))]
pub fn analyze(
    cache: &mut ModuleCache,
    loader: &dyn ModuleLoader,
    module_path: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<SemanticTree, FrontendError> {
    let module = cache.get_or_load(loader, module_path, true, diagnostics)?;

    let mut analyzer = Analyzer::new(cache, loader);
    analyzer.analyze_module(&module);
    let (tree, analysis) = analyzer.finish();

    tracing::info!(
        module = %module.name,
        typedefs = tree.typedefs.len(),
        datas = tree.datas.len(),
        functions = tree.functions.len(),
        "module analyzed"
    );
    diagnostics.absorb(analysis);
    Ok(tree)
}
