//! Logging facilities for editgrid.
//!
//! editgrid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("editgrid=debug,editgrid_core=warn")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core systems target.
    pub const CORE: &str = "editgrid_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "editgrid_core::signal";
    /// Deferred timer target.
    pub const TIMER: &str = "editgrid_core::timer";
    /// Grid composition target (columns, sorting, repaint).
    pub const GRID: &str = "editgrid::grid";
    /// Inline edit state machine target.
    pub const EDIT: &str = "editgrid::edit";
    /// Focus requests issued by the edit controller.
    pub const FOCUS: &str = "editgrid::focus";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing an operation such as a re-sort of the record collection.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "editgrid::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with the grid target filled in.
#[macro_export]
macro_rules! grid_trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "editgrid::grid", $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "editgrid::grid", $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "editgrid::grid", $($arg)*)
    };
}

#[macro_export]
macro_rules! grid_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "editgrid::grid", $($arg)*)
    };
}
