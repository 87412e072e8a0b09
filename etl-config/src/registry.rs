//! Ordered, duplicate-free registry of configuration sources.

use std::fmt;
use std::sync::Arc;

use etl_messages::{MessageCatalog, MessageKind, placeholders};
use etl_primitives::{ComponentId, StatusCode};
use tracing::{info, warn};

use crate::fs::{EntryKind, OsFs, SourceFs};
use crate::lifecycle::{ConfigState, Lifecycle, LifecycleEvent, LifecycleResult};
use crate::policy::{TraversalPolicy, aggregate};
use crate::settings::DEFAULT_MAX_DEPTH;

/// Registry of configuration source files for one component.
///
/// Paths are stored exactly as discovered and compared as raw strings, so a
/// registry must be fed either relative or absolute paths, never both.
/// Directories are never stored; registering one records the files found
/// beneath it.
///
/// ```no_run
/// use etl_config::ConfigurationRegistry;
///
/// let mut registry = ConfigurationRegistry::new("csv-reader");
/// let status = registry.register("conf/reader");
/// assert!(status.is_ok());
/// println!("{} sources", registry.count());
/// ```
pub struct ConfigurationRegistry {
    name: String,
    sources: Vec<String>,
    lifecycle: Lifecycle,
    policy: TraversalPolicy,
    default_max_depth: i32,
    fs: Arc<dyn SourceFs>,
    messages: Arc<MessageCatalog>,
}

impl fmt::Debug for ConfigurationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRegistry")
            .field("id", &self.id())
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("state", &self.lifecycle.state())
            .field("policy", &self.policy)
            .field("default_max_depth", &self.default_max_depth)
            .finish_non_exhaustive()
    }
}

impl ConfigurationRegistry {
    /// Creates an empty, unconfigured registry reading the real filesystem.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            lifecycle: Lifecycle::new(ComponentId::random()),
            policy: TraversalPolicy::default(),
            default_max_depth: DEFAULT_MAX_DEPTH,
            fs: Arc::new(OsFs),
            messages: Arc::new(MessageCatalog::default()),
        }
    }

    /// Replaces the filesystem used for classification and listing.
    #[must_use]
    pub fn with_fs(mut self, fs: Arc<dyn SourceFs>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the message catalog used for log output.
    #[must_use]
    pub fn with_messages(mut self, messages: Arc<MessageCatalog>) -> Self {
        self.messages = messages;
        self
    }

    /// Replaces the traversal policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TraversalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the depth bound used by [`ConfigurationRegistry::register`].
    #[must_use]
    pub fn with_default_max_depth(mut self, depth: i32) -> Self {
        self.default_max_depth = depth;
        self
    }

    /// Returns the component identifier.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.lifecycle.component_id()
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the registered sources in discovery order.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns the number of registered sources.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` once any registration returned success or a warning,
    /// until the registry is deconfigured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.lifecycle.state().is_configured()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConfigState {
        self.lifecycle.state()
    }

    /// Returns the traversal policy.
    #[must_use]
    pub const fn policy(&self) -> TraversalPolicy {
        self.policy
    }

    /// Returns a mutable handle to the traversal policy. Changes apply from
    /// the next call.
    pub fn policy_mut(&mut self) -> &mut TraversalPolicy {
        &mut self.policy
    }

    /// Returns the default depth bound.
    #[must_use]
    pub const fn default_max_depth(&self) -> i32 {
        self.default_max_depth
    }

    /// Registers `path` using the default depth bound.
    pub fn register(&mut self, path: &str) -> StatusCode {
        self.register_with_depth(path, self.default_max_depth)
    }

    /// Registers `path`, descending at most `max_depth` directory levels.
    ///
    /// - A missing path yields [`StatusCode::PATH_NOT_FOUND`].
    /// - A file is appended and yields [`StatusCode::SUCCESS`], or yields
    ///   [`StatusCode::ALREADY_REGISTERED`] if it is already present.
    /// - A directory with `max_depth < 0` is skipped; the status is set by
    ///   [`TraversalPolicy::depth_exceeded_status`].
    /// - Any other directory registers its children with `max_depth - 1`,
    ///   folded by [`aggregate`] with [`TraversalPolicy::step_on_add`], using
    ///   the policy as it stood when this directory started.
    ///
    /// A non-negative result marks the registry configured.
    pub fn register_with_depth(&mut self, path: &str, max_depth: i32) -> StatusCode {
        let status = match self.fs.classify(path) {
            EntryKind::Missing => {
                info!(
                    component = %self.name,
                    path,
                    "{}",
                    self.render(MessageKind::SourceNotFound, path)
                );
                StatusCode::PATH_NOT_FOUND
            }
            EntryKind::Directory => self.register_directory(path, max_depth),
            EntryKind::File => self.register_file(path),
        };

        if status.is_ok() {
            self.mark(LifecycleEvent::Register);
        }

        status
    }

    fn register_directory(&mut self, path: &str, max_depth: i32) -> StatusCode {
        info!(
            component = %self.name,
            path,
            depth = max_depth,
            "{}",
            self.render(MessageKind::DirectoryFound, path)
        );

        if max_depth < 0 {
            info!(
                component = %self.name,
                path,
                "{}",
                self.render(MessageKind::MaxDepthReached, path)
            );
            return self.policy.depth_exceeded_status();
        }

        let children = match self.fs.list(path) {
            Ok(children) => children,
            Err(err) => {
                warn!(
                    component = %self.name,
                    path,
                    error = %err,
                    "{}",
                    self.render(MessageKind::DirectoryUnreadable, path)
                );
                return StatusCode::PATH_NOT_FOUND;
            }
        };

        let policy = self.policy;
        aggregate(
            children,
            |acc| policy.step_on_add(acc),
            |child| self.register_with_depth(&child, max_depth - 1),
        )
    }

    fn register_file(&mut self, path: &str) -> StatusCode {
        if self.sources.iter().any(|source| source == path) {
            info!(
                component = %self.name,
                path,
                "{}",
                self.render(MessageKind::SourceAlreadyAdded, path)
            );
            return StatusCode::ALREADY_REGISTERED;
        }

        self.sources.push(path.to_owned());
        let id = self.id().to_string();
        let count = self.count().to_string();
        info!(
            component = %self.name,
            path,
            count = self.count(),
            "{}",
            self.messages.render(
                MessageKind::SourceAdded,
                &[
                    (placeholders::FILE, path),
                    (placeholders::COUNT, count.as_str()),
                    (placeholders::ID, id.as_str()),
                    (placeholders::COMPONENT, self.name.as_str()),
                ],
            )
        );
        StatusCode::SUCCESS
    }

    /// Applies every registered source in order using `apply_source`.
    ///
    /// Per-source statuses are folded with the configure-time suppression
    /// flag. A non-negative result moves the registry to
    /// [`ConfigState::Applied`].
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`](crate::LifecycleError)
    /// without visiting any source when the registry is unconfigured.
    pub fn apply<F>(&mut self, apply_source: F) -> LifecycleResult<StatusCode>
    where
        F: FnMut(&str) -> StatusCode,
    {
        self.lifecycle.next_state(LifecycleEvent::Apply)?;
        info!(
            component = %self.name,
            sources = self.count(),
            "{}",
            self.render_identity(MessageKind::ConfigInfo)
        );

        let policy = self.policy;
        let status = aggregate(
            self.sources.iter().map(String::as_str),
            |acc| policy.step_on_configure(acc),
            apply_source,
        );

        if status.is_ok() {
            self.lifecycle.transition(LifecycleEvent::Apply)?;
        }
        Ok(status)
    }

    /// Returns the registry to [`ConfigState::Unconfigured`]. Registered
    /// sources are kept. Safe to call repeatedly or on a registry that was
    /// never configured.
    pub fn deconfigure(&mut self) -> StatusCode {
        info!(
            component = %self.name,
            "{}",
            self.render_identity(MessageKind::DeconfigInfo)
        );
        self.mark(LifecycleEvent::Deconfigure);
        StatusCode::SUCCESS
    }

    fn mark(&mut self, event: LifecycleEvent) {
        if let Err(err) = self.lifecycle.transition(event) {
            warn!(component = %self.name, error = %err, "lifecycle transition rejected");
        }
    }

    fn render(&self, kind: MessageKind, path: &str) -> String {
        self.messages.render(kind, &[(placeholders::FILE, path)])
    }

    fn render_identity(&self, kind: MessageKind) -> String {
        let id = self.id().to_string();
        self.messages.render(
            kind,
            &[
                (placeholders::ID, id.as_str()),
                (placeholders::COMPONENT, self.name.as_str()),
            ],
        )
    }
}
