//! Symbol resolution over explicitly registered modules.
//!
//! The analogue of "add the file's directory to the search path, then import
//! the symbol" is: register a [`Module`] once per run, then resolve dotted
//! paths against it. Nothing is loaded dynamically; resolution failures are
//! typed errors, not import crashes.

use std::collections::HashMap;

use crate::handle::{ClassHandle, FunctionHandle, MethodHandle};
use crate::path::TargetPath;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("'{path}' must either be a function name or a single-level class method")]
    InvalidTargetPath { path: String },

    #[error("module '{module}' is not registered")]
    ModuleNotFound { module: String },

    #[error("symbol '{symbol}' not found in module '{module}'")]
    SymbolNotFound { module: String, symbol: String },
}

/// A named registration scope — one loadable source file's worth of targets.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: String,
    functions: HashMap<String, FunctionHandle>,
    classes: HashMap<String, ClassHandle>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: HashMap::new(),
            classes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_function(mut self, function: FunctionHandle) -> Self {
        self.functions
            .insert(function.name().to_string(), function);
        self
    }

    pub fn with_class(mut self, class: ClassHandle) -> Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    pub fn function(&self, name: &str) -> Option<&FunctionHandle> {
        self.functions.get(name)
    }

    pub fn class(&self, name: &str) -> Option<&ClassHandle> {
        self.classes.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionHandle> {
        self.functions.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassHandle> {
        self.classes.values()
    }
}

/// A resolved target, borrowed from the registry.
///
/// Depth-2 resolution exposes the enclosing class alongside the method so
/// the caller can fuzz the constructor independently.
#[derive(Debug)]
pub enum ResolvedTarget<'a> {
    Function(&'a FunctionHandle),
    Method {
        class: &'a ClassHandle,
        method: &'a MethodHandle,
    },
}

/// The resolution search path: every module registered for this run.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: HashMap<String, Module>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time setup per run; later registrations under the same name
    /// replace the earlier module.
    pub fn register(&mut self, module: Module) {
        self.modules.insert(module.name().to_string(), module);
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Resolve a parsed path against a registered module.
    pub fn resolve<'a>(
        &'a self,
        module: &str,
        path: &TargetPath,
    ) -> Result<ResolvedTarget<'a>, ResolveError> {
        let scope = self
            .modules
            .get(module)
            .ok_or_else(|| ResolveError::ModuleNotFound {
                module: module.to_string(),
            })?;

        match path {
            TargetPath::Function(name) => scope
                .function(name)
                .map(ResolvedTarget::Function)
                .ok_or_else(|| ResolveError::SymbolNotFound {
                    module: module.to_string(),
                    symbol: name.clone(),
                }),
            TargetPath::Method { class, method } => {
                let class_handle =
                    scope
                        .class(class)
                        .ok_or_else(|| ResolveError::SymbolNotFound {
                            module: module.to_string(),
                            symbol: class.clone(),
                        })?;
                let method_handle =
                    class_handle
                        .method(method)
                        .ok_or_else(|| ResolveError::SymbolNotFound {
                            module: module.to_string(),
                            symbol: format!("{class}.{method}"),
                        })?;
                Ok(ResolvedTarget::Method {
                    class: class_handle,
                    method: method_handle,
                })
            }
        }
    }
}
