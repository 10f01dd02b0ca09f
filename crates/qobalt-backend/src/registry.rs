//! Runner registry.
//!
//! The [`RunnerRegistry`] maps runner names to factories. Besides the
//! instance type there is a process-wide registry: backend providers install
//! themselves at startup with [`register_runner`], and callers resolve names
//! with [`create_runner`]. Registration is write-once-ish and lookups are
//! read-mostly, so the global instance sits behind a read/write lock.

use std::sync::{OnceLock, RwLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RunError, RunResult};
use crate::runner::{Runner, RunnerConfig, RunnerFactory};

/// Factory function type for runners.
type FactoryFn = Box<dyn Fn(RunnerConfig) -> RunResult<Box<dyn Runner>> + Send + Sync>;

/// A name → factory mapping for runners.
pub struct RunnerRegistry {
    factories: FxHashMap<String, FactoryFn>,
}

impl RunnerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a typed runner factory.
    pub fn register<R>(&mut self, name: impl Into<String>)
    where
        R: RunnerFactory + 'static,
    {
        let name = name.into();
        debug!("Registering runner: {}", name);
        self.factories.insert(
            name,
            Box::new(|config| {
                let runner = R::from_config(config)?;
                Ok(Box::new(runner))
            }),
        );
    }

    /// Register a runner factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(RunnerConfig) -> RunResult<Box<dyn Runner>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering factory runner: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Create a runner by name.
    pub fn create(&self, name: &str, config: RunnerConfig) -> RunResult<Box<dyn Runner>> {
        match self.factories.get(name) {
            Some(factory) => factory(config),
            None => Err(RunError::UnknownRunner(name.to_string())),
        }
    }

    /// List all registered runner names, sorted.
    pub fn available_runners(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a runner is registered under `name`.
    pub fn has_runner(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for RunnerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry instance.
fn global() -> &'static RwLock<RunnerRegistry> {
    static GLOBAL: OnceLock<RwLock<RunnerRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(RunnerRegistry::new()))
}

/// Register a runner factory in the process-wide registry.
pub fn register_runner(
    name: impl Into<String>,
    factory: impl Fn(RunnerConfig) -> RunResult<Box<dyn Runner>> + Send + Sync + 'static,
) {
    let mut registry = global()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.register_factory(name, factory);
}

/// Create a runner from the process-wide registry with a default
/// configuration.
pub fn create_runner(name: &str) -> RunResult<Box<dyn Runner>> {
    create_runner_with(name, RunnerConfig::new(name))
}

/// Create a runner from the process-wide registry with an explicit
/// configuration.
pub fn create_runner_with(name: &str, config: RunnerConfig) -> RunResult<Box<dyn Runner>> {
    let registry = global()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.create(name, config)
}

/// Check the process-wide registry for `name`.
pub fn has_runner(name: &str) -> bool {
    let registry = global()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.has_runner(name)
}

/// List runner names in the process-wide registry, sorted.
pub fn available_runners() -> Vec<String> {
    let registry = global()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.available_runners()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = RunnerRegistry::new();
        assert!(registry.available_runners().is_empty());
        assert!(!registry.has_runner("statevector"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = RunnerRegistry::new();
        registry.register_factory("test", |_config| {
            Err(RunError::Internal("factory for test only".into()))
        });

        assert!(registry.has_runner("test"));
        assert_eq!(registry.available_runners(), vec!["test"]);
    }

    #[test]
    fn test_create_unknown_runner() {
        let registry = RunnerRegistry::new();
        let result = registry.create("nonexistent", RunnerConfig::new("nonexistent"));
        assert!(matches!(result, Err(RunError::UnknownRunner(name)) if name == "nonexistent"));
    }

    #[test]
    fn test_available_runners_sorted() {
        let mut registry = RunnerRegistry::new();
        registry.register_factory("zeta", |_| Err(RunError::Internal("test".into())));
        registry.register_factory("alpha", |_| Err(RunError::Internal("test".into())));
        assert_eq!(registry.available_runners(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_global_registry_roundtrip() {
        register_runner("test-global", |_| {
            Err(RunError::Internal("not constructible".into()))
        });
        assert!(has_runner("test-global"));
        assert!(!has_runner("test-global-missing"));
        assert!(matches!(
            create_runner("test-global-missing"),
            Err(RunError::UnknownRunner(_))
        ));
    }
}
