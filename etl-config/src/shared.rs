//! Lock-guarded registry for components shared between threads.

use std::sync::{Arc, RwLock};

use etl_primitives::StatusCode;

use crate::policy::TraversalPolicy;
use crate::registry::ConfigurationRegistry;

/// Cloneable handle serialising access to a [`ConfigurationRegistry`].
///
/// Each registration holds the write lock for its whole traversal, so the
/// duplicate check and the append can never interleave with another call,
/// and policy updates only take effect between registrations.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ConfigurationRegistry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    #[must_use]
    pub fn new(registry: ConfigurationRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Registers `path` using the default depth bound.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn register(&self, path: &str) -> StatusCode {
        self.inner
            .write()
            .expect("configuration registry poisoned")
            .register(path)
    }

    /// Registers `path` with an explicit depth bound.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn register_with_depth(&self, path: &str, max_depth: i32) -> StatusCode {
        self.inner
            .write()
            .expect("configuration registry poisoned")
            .register_with_depth(path, max_depth)
    }

    /// Returns the number of registered sources.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner
            .read()
            .expect("configuration registry poisoned")
            .count()
    }

    /// Returns a copy of the registered sources.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("configuration registry poisoned")
            .sources()
            .to_vec()
    }

    /// Returns `true` once any registration did not fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner
            .read()
            .expect("configuration registry poisoned")
            .is_configured()
    }

    /// Replaces the traversal policy.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn set_policy(&self, policy: TraversalPolicy) {
        *self
            .inner
            .write()
            .expect("configuration registry poisoned")
            .policy_mut() = policy;
    }

    /// Runs `f` with exclusive access to the registry.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut ConfigurationRegistry) -> R) -> R {
        let mut guard = self.inner.write().expect("configuration registry poisoned");
        f(&mut guard)
    }
}

impl From<ConfigurationRegistry> for SharedRegistry {
    fn from(registry: ConfigurationRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::fs::SourceFs;
    use crate::memory_fs::MemoryFs;

    #[test]
    fn concurrent_registration_never_duplicates() {
        let fs = (0..16).fold(MemoryFs::new(), |fs, i| fs.with_file(format!("f{i}")));
        let shared = SharedRegistry::new(
            ConfigurationRegistry::new("shared").with_fs(Arc::new(fs) as Arc<dyn SourceFs>),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..16)
                        .map(|i| shared.register(&format!("f{i}")))
                        .filter(|status| status.is_success())
                        .count()
                })
            })
            .collect();

        let added: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(added, 16);
        assert_eq!(shared.count(), 16);
        assert!(shared.is_configured());
    }

    #[test]
    fn policy_updates_apply_to_next_call() {
        let fs = MemoryFs::new()
            .with_dir("d", ["d/a", "d/b"])
            .with_file("d/a")
            .with_file("d/b");
        let shared: SharedRegistry = ConfigurationRegistry::new("shared")
            .with_fs(Arc::new(fs) as Arc<dyn SourceFs>)
            .into();

        shared.register("d/a");
        assert_eq!(shared.register("d"), StatusCode::ALREADY_REGISTERED);
        assert_eq!(shared.sources(), ["d/a"]);

        shared.set_policy(TraversalPolicy::new().with_suppress_warnings_on_add(true));
        assert_eq!(shared.register("d"), StatusCode::SUCCESS);
        assert_eq!(shared.sources(), ["d/a", "d/b"]);
        assert_eq!(shared.with_registry(|registry| registry.name().to_owned()), "shared");
    }
}
