//! Core systems for editgrid.
//!
//! This crate provides the foundational pieces the editable grid is built on:
//!
//! - **Signal/Slot System**: Typed subscriber lists for outbound UI events
//! - **Timers**: One-shot deferred payloads driven by the host event loop
//! - **Logging**: `tracing` targets and convenience macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use editgrid_core::Signal;
//!
//! let edit_started = Signal::<()>::new();
//!
//! let conn_id = edit_started.connect(|_| {
//!     println!("editing");
//! });
//!
//! edit_started.emit(());
//! edit_started.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use editgrid_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let mut timers = TimerManager::new();
//! let now = Instant::now();
//! timers.start_one_shot_at(now, Duration::from_millis(200), (3usize, 1usize));
//!
//! for (_id, (row, column)) in timers.take_expired(now + Duration::from_millis(200)) {
//!     println!("focus cell ({row}, {column})");
//! }
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{Result, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};

#[doc(hidden)]
pub use tracing;
