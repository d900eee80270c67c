//! Time sources and cooperative timers.
//!
//! # Responsibility
//! - Abstract wall-clock reads so timestamping and debounce are testable.
//! - Provide the trailing-edge debounce used by search inputs.
//!
//! # Invariants
//! - Timers never fire on their own; the owning controller polls them with the
//!   current time, on the single logical UI thread.

pub mod clock;
pub mod debounce;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{DebounceHandle, Debouncer, DEFAULT_QUIET_MS};
