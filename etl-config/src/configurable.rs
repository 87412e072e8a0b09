//! Trait implemented by every configurable ETL component.

use etl_primitives::StatusCode;

use crate::registry::ConfigurationRegistry;

/// Basic contract of a configurable component.
///
/// Components own a [`ConfigurationRegistry`] and expose it through
/// [`registry`](Configurable::registry) and
/// [`registry_mut`](Configurable::registry_mut); source handling is provided.
/// Each component decides how many sources it needs and implements
/// [`configure`](Configurable::configure) and
/// [`deconfigure`](Configurable::deconfigure) itself, usually on top of
/// [`ConfigurationRegistry::apply`] and
/// [`ConfigurationRegistry::deconfigure`].
///
/// All methods returning [`StatusCode`] follow the same convention: zero on
/// success, positive for warnings, negative for errors.
pub trait Configurable {
    /// Returns the component's source registry.
    fn registry(&self) -> &ConfigurationRegistry;

    /// Returns the component's source registry mutably.
    fn registry_mut(&mut self) -> &mut ConfigurationRegistry;

    /// Adds a file, or every file below a directory, using the default depth
    /// bound.
    fn add_source(&mut self, path: &str) -> StatusCode {
        self.registry_mut().register(path)
    }

    /// Adds a file, or every file below a directory down to `max_depth`
    /// levels.
    fn add_source_with_depth(&mut self, path: &str, max_depth: i32) -> StatusCode {
        self.registry_mut().register_with_depth(path, max_depth)
    }

    /// Number of registered source files.
    fn source_count(&self) -> usize {
        self.registry().count()
    }

    /// Returns `true` once a source registration did not fail.
    fn is_configured(&self) -> bool {
        self.registry().is_configured()
    }

    /// Sets whether warnings are ignored while adding sources from a
    /// directory. Errors still stop the traversal.
    fn set_suppress_warnings_on_add(&mut self, suppress: bool) {
        self.registry_mut()
            .policy_mut()
            .set_suppress_warnings_on_add(suppress);
    }

    /// Sets whether warnings are ignored while configuring.
    fn set_suppress_warnings_on_configure(&mut self, suppress: bool) {
        self.registry_mut()
            .policy_mut()
            .set_suppress_warnings_on_configure(suppress);
    }

    /// Reads the registered sources and initialises the component.
    fn configure(&mut self) -> StatusCode;

    /// Releases everything acquired by [`configure`](Configurable::configure).
    /// Must be safe to call when the component was never configured.
    fn deconfigure(&mut self) -> StatusCode;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fs::SourceFs;
    use crate::memory_fs::MemoryFs;

    /// Component that "opens" every source during configuration.
    struct Reader {
        registry: ConfigurationRegistry,
        open: Vec<String>,
    }

    impl Reader {
        fn new(fs: MemoryFs) -> Self {
            Self {
                registry: ConfigurationRegistry::new("reader")
                    .with_fs(Arc::new(fs) as Arc<dyn SourceFs>),
                open: Vec::new(),
            }
        }
    }

    impl Configurable for Reader {
        fn registry(&self) -> &ConfigurationRegistry {
            &self.registry
        }

        fn registry_mut(&mut self) -> &mut ConfigurationRegistry {
            &mut self.registry
        }

        fn configure(&mut self) -> StatusCode {
            let open = &mut self.open;
            match self.registry.apply(|path| {
                open.push(path.to_owned());
                StatusCode::SUCCESS
            }) {
                Ok(status) => status,
                Err(err) => err.status(),
            }
        }

        fn deconfigure(&mut self) -> StatusCode {
            self.open.clear();
            self.registry.deconfigure()
        }
    }

    #[test]
    fn provided_methods_delegate_to_registry() {
        let mut reader = Reader::new(
            MemoryFs::new()
                .with_dir("conf", ["conf/a", "conf/b"])
                .with_file("conf/a")
                .with_file("conf/b"),
        );
        assert!(!reader.is_configured());
        assert_eq!(reader.add_source("conf"), StatusCode::SUCCESS);
        assert_eq!(reader.source_count(), 2);
        assert_eq!(reader.add_source_with_depth("conf/a", 0), StatusCode::ALREADY_REGISTERED);

        reader.set_suppress_warnings_on_add(true);
        reader.set_suppress_warnings_on_configure(true);
        let policy = reader.registry().policy();
        assert!(policy.suppress_warnings_on_add());
        assert!(policy.suppress_warnings_on_configure());
    }

    #[test]
    fn configure_and_deconfigure_cycle() {
        let mut reader = Reader::new(MemoryFs::new().with_file("a"));
        assert_eq!(reader.configure(), StatusCode::NOT_CONFIGURED);
        assert_eq!(reader.deconfigure(), StatusCode::SUCCESS);

        reader.add_source("a");
        assert_eq!(reader.configure(), StatusCode::SUCCESS);
        assert_eq!(reader.open, ["a"]);

        assert_eq!(reader.deconfigure(), StatusCode::SUCCESS);
        assert!(reader.open.is_empty());
        assert!(!reader.is_configured());
    }
}
