//! Trailing-edge debounce.
//!
//! # Invariants
//! - At most one update is pending; scheduling replaces it and restarts the quiet interval.
//! - A pending update fires once, only after `quiet_ms` elapsed since the last schedule.
//! - After [`Debouncer::teardown`] nothing is pending and nothing can be scheduled.

/// Quiet interval applied to search input, in milliseconds.
pub const DEFAULT_QUIET_MS: u64 = 200;

/// Handle identifying one scheduled update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceHandle {
    generation: u64,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due_ms: i64,
    generation: u64,
}

/// Debounces values of `T` against caller-supplied timestamps.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: u64,
    pending: Option<Pending<T>>,
    next_generation: u64,
    torn_down: bool,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer; a zero interval is normalized to 1ms.
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(1),
            pending: None,
            next_generation: 0,
            torn_down: false,
        }
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Schedules `value`, cancelling any pending update.
    ///
    /// Returns `None` once the debouncer has been torn down.
    pub fn schedule(&mut self, value: T, now_ms: i64) -> Option<DebounceHandle> {
        if self.torn_down {
            return None;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        let quiet = i64::try_from(self.quiet_ms).unwrap_or(i64::MAX);
        self.pending = Some(Pending {
            value,
            due_ms: now_ms.saturating_add(quiet),
            generation,
        });
        Some(DebounceHandle { generation })
    }

    /// Cancels the update identified by `handle` if it is still pending.
    pub fn cancel(&mut self, handle: DebounceHandle) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == handle.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time at which the pending update becomes due.
    pub fn due_at(&self) -> Option<i64> {
        self.pending.as_ref().map(|pending| pending.due_ms)
    }

    /// Takes the pending value when its quiet interval has elapsed at `now_ms`.
    pub fn fire_due(&mut self, now_ms: i64) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now_ms >= pending.due_ms);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops any pending update and refuses future schedules.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;

    #[test]
    fn rapid_schedules_collapse_to_last_value() {
        let mut debouncer = Debouncer::new(200);
        debouncer.schedule("e", 0);
        debouncer.schedule("eb", 50);
        debouncer.schedule("ebp", 120);
        debouncer.schedule("ebpf", 190);

        assert_eq!(debouncer.fire_due(389), None);
        assert_eq!(debouncer.fire_due(390), Some("ebpf"));
        assert_eq!(debouncer.fire_due(10_000), None);
    }

    #[test]
    fn cancel_ignores_stale_handles() {
        let mut debouncer = Debouncer::new(200);
        let first = debouncer.schedule(1, 0).unwrap();
        let second = debouncer.schedule(2, 10).unwrap();

        assert!(!debouncer.cancel(first));
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel(second));
        assert_eq!(debouncer.fire_due(1_000), None);
    }

    #[test]
    fn teardown_drops_pending_and_blocks_new_schedules() {
        let mut debouncer = Debouncer::new(200);
        debouncer.schedule("late", 0);
        debouncer.teardown();

        assert_eq!(debouncer.fire_due(1_000), None);
        assert!(debouncer.schedule("after", 1_000).is_none());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn zero_interval_is_normalized() {
        let debouncer = Debouncer::<()>::new(0);
        assert_eq!(debouncer.quiet_ms(), 1);
    }
}
