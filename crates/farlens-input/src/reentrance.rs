//! Debug-only re-entrance guard for methods documented as running on the
//! single logical event-loop thread (§5, §10).

use std::cell::Cell;

thread_local! {
    static IN_CORE_CALL: Cell<bool> = const { Cell::new(false) };
}

/// RAII guard asserting, in debug builds, that the calling thread is not
/// already inside another guarded call.
pub struct ReentranceGuard;

impl ReentranceGuard {
    pub fn enter() -> Self {
        IN_CORE_CALL.with(|flag| {
            debug_assert!(
                !flag.get(),
                "re-entered a single-thread event-loop method; this violates the concurrency invariant"
            );
            flag.set(true);
        });
        ReentranceGuard
    }
}

impl Drop for ReentranceGuard {
    fn drop(&mut self) {
        IN_CORE_CALL.with(|flag| flag.set(false));
    }
}
