//! Warning suppression flags and the status aggregation rule.

use etl_primitives::StatusCode;
use tracing::debug;

/// Outcome of inspecting the running aggregate after one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move on to the next child.
    Continue,
    /// Stop: a warning was produced and warnings are not suppressed.
    StopWithWarning,
    /// Stop: an error was produced. Suppression never applies to errors.
    StopWithError,
}

impl Step {
    /// Decides how to proceed given the running aggregate.
    #[must_use]
    pub const fn after(acc: StatusCode, suppress_warnings: bool) -> Self {
        if acc.is_error() {
            Self::StopWithError
        } else if acc.is_warning() && !suppress_warnings {
            Self::StopWithWarning
        } else {
            Self::Continue
        }
    }
}

/// Folds statuses produced by `visit` over `items`, left to right.
///
/// The aggregate starts at [`StatusCode::SUCCESS`] and is replaced by each
/// item's status. After every item `step` decides whether to go on, usually
/// [`TraversalPolicy::step_on_add`] or [`TraversalPolicy::step_on_configure`];
/// once it says stop, later items are never visited. The returned status is
/// the aggregate after the last visited item.
pub fn aggregate<I, S, F>(items: I, step: S, mut visit: F) -> StatusCode
where
    I: IntoIterator,
    S: Fn(StatusCode) -> Step,
    F: FnMut(I::Item) -> StatusCode,
{
    let mut acc = StatusCode::SUCCESS;
    for item in items {
        acc = visit(item);
        match step(acc) {
            Step::Continue => {}
            step @ (Step::StopWithWarning | Step::StopWithError) => {
                debug!(status = %acc, ?step, "stopping traversal early");
                break;
            }
        }
    }
    acc
}

/// Flags steering how warnings propagate during registration and
/// configuration.
///
/// The policy is a plain `Copy` value. Each fold works on the copy taken when
/// it starts: every directory during registration, and the whole source list
/// during [`apply`](crate::ConfigurationRegistry::apply). A
/// [`ConfigurationRegistry`] is borrowed mutably for those calls, so its
/// policy cannot change before they return; wrap it in a [`SharedRegistry`]
/// to coordinate updates across threads.
///
/// [`ConfigurationRegistry`]: crate::ConfigurationRegistry
/// [`SharedRegistry`]: crate::SharedRegistry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalPolicy {
    suppress_warnings_on_add: bool,
    suppress_warnings_on_configure: bool,
    report_depth_exceeded: bool,
}

impl TraversalPolicy {
    /// Creates a policy with every flag off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            suppress_warnings_on_add: false,
            suppress_warnings_on_configure: false,
            report_depth_exceeded: false,
        }
    }

    /// Sets whether warnings are ignored while adding sources.
    #[must_use]
    pub const fn with_suppress_warnings_on_add(mut self, suppress: bool) -> Self {
        self.suppress_warnings_on_add = suppress;
        self
    }

    /// Sets whether warnings are ignored while applying configuration.
    #[must_use]
    pub const fn with_suppress_warnings_on_configure(mut self, suppress: bool) -> Self {
        self.suppress_warnings_on_configure = suppress;
        self
    }

    /// Sets whether hitting the depth bound yields
    /// [`StatusCode::DEPTH_EXCEEDED`] instead of a silent success.
    #[must_use]
    pub const fn with_report_depth_exceeded(mut self, report: bool) -> Self {
        self.report_depth_exceeded = report;
        self
    }

    /// Returns `true` when warnings are ignored while adding sources.
    #[must_use]
    pub const fn suppress_warnings_on_add(self) -> bool {
        self.suppress_warnings_on_add
    }

    /// Returns `true` when warnings are ignored while applying configuration.
    #[must_use]
    pub const fn suppress_warnings_on_configure(self) -> bool {
        self.suppress_warnings_on_configure
    }

    /// Returns `true` when a depth skip is reported as a warning.
    #[must_use]
    pub const fn report_depth_exceeded(self) -> bool {
        self.report_depth_exceeded
    }

    /// Updates the add-time suppression flag.
    pub fn set_suppress_warnings_on_add(&mut self, suppress: bool) {
        self.suppress_warnings_on_add = suppress;
    }

    /// Updates the configure-time suppression flag.
    pub fn set_suppress_warnings_on_configure(&mut self, suppress: bool) {
        self.suppress_warnings_on_configure = suppress;
    }

    /// Updates the depth reporting flag.
    pub fn set_report_depth_exceeded(&mut self, report: bool) {
        self.report_depth_exceeded = report;
    }

    /// Step to take after a child registration produced `acc`.
    #[must_use]
    pub const fn step_on_add(self, acc: StatusCode) -> Step {
        Step::after(acc, self.suppress_warnings_on_add)
    }

    /// Step to take after applying one source produced `acc`.
    #[must_use]
    pub const fn step_on_configure(self, acc: StatusCode) -> Step {
        Step::after(acc, self.suppress_warnings_on_configure)
    }

    /// Status returned for a directory skipped at the depth bound.
    #[must_use]
    pub const fn depth_exceeded_status(self) -> StatusCode {
        if self.report_depth_exceeded {
            StatusCode::DEPTH_EXCEEDED
        } else {
            StatusCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARN: StatusCode = StatusCode::ALREADY_REGISTERED;
    const ERR: StatusCode = StatusCode::PATH_NOT_FOUND;
    const OK: StatusCode = StatusCode::SUCCESS;

    fn run(statuses: &[StatusCode], suppress: bool) -> (StatusCode, usize) {
        let policy = TraversalPolicy::new().with_suppress_warnings_on_add(suppress);
        let mut visited = 0;
        let status = aggregate(statuses.iter().copied(), |acc| policy.step_on_add(acc), |status| {
            visited += 1;
            status
        });
        (status, visited)
    }

    #[test]
    fn empty_input_is_success() {
        assert_eq!(run(&[], false), (OK, 0));
    }

    #[test]
    fn all_success_visits_everything() {
        assert_eq!(run(&[OK, OK, OK], false), (OK, 3));
    }

    #[test]
    fn warning_stops_without_suppression() {
        assert_eq!(run(&[OK, WARN, OK], false), (WARN, 2));
    }

    #[test]
    fn warning_is_swallowed_with_suppression() {
        assert_eq!(run(&[WARN, OK, WARN], true), (WARN, 3));
        assert_eq!(run(&[OK, WARN, OK], true), (OK, 3));
    }

    #[test]
    fn error_always_stops() {
        assert_eq!(run(&[OK, ERR, OK], false), (ERR, 2));
        assert_eq!(run(&[WARN, ERR, OK], true), (ERR, 2));
    }

    #[test]
    fn three_way_step() {
        assert_eq!(Step::after(OK, false), Step::Continue);
        assert_eq!(Step::after(WARN, false), Step::StopWithWarning);
        assert_eq!(Step::after(WARN, true), Step::Continue);
        assert_eq!(Step::after(ERR, true), Step::StopWithError);
    }

    #[test]
    fn flags_are_independent() {
        let policy = TraversalPolicy::new().with_suppress_warnings_on_configure(true);
        assert_eq!(policy.step_on_add(WARN), Step::StopWithWarning);
        assert_eq!(policy.step_on_configure(WARN), Step::Continue);
    }

    #[test]
    fn configure_fold_uses_configure_flag() {
        let policy = TraversalPolicy::new().with_suppress_warnings_on_configure(true);
        let status = aggregate([WARN, OK], |acc| policy.step_on_configure(acc), |status| status);
        assert_eq!(status, OK);
        let status = aggregate([WARN, OK], |acc| policy.step_on_add(acc), |status| status);
        assert_eq!(status, WARN);
    }

    #[test]
    fn depth_skip_is_silent_unless_reported() {
        let mut policy = TraversalPolicy::default();
        assert_eq!(policy.depth_exceeded_status(), OK);
        policy.set_report_depth_exceeded(true);
        assert_eq!(policy.depth_exceeded_status(), StatusCode::DEPTH_EXCEEDED);
    }
}
