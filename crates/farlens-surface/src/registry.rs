//! Surface Registry (§4.4): per-surface frame-ID allocation and
//! presentation-latency accounting.

use std::collections::HashMap;

use crate::reentrance::ReentranceGuard;

const INITIAL_FRAME_CAPACITY: usize = 64;

/// Opaque handle to a registered surface. Assigned by `register`, unlike the
/// source's raw `wl_surface*` — the registry owns ID assignment so callers
/// never need to invent their own surface identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

/// Outcome of a `notify_frame_presented` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePresented {
    pub latency_ms: u32,
    pub dropped: bool,
}

struct SurfaceEntry {
    frame_id_counter: u64,
    /// Indexed by frame_id (index 0 unused; frame IDs start at 1). A zero
    /// entry means "retired or never allocated".
    frame_timestamps: Vec<u64>,
}

impl SurfaceEntry {
    fn new() -> Self {
        Self {
            frame_id_counter: 0,
            frame_timestamps: vec![0; INITIAL_FRAME_CAPACITY],
        }
    }
}

/// Tracks registered surfaces and the frame IDs allocated against them.
///
/// A process-wide singleton in the source; here an ordinary value the
/// session orchestrator owns and passes around, since Rust has no need for a
/// hidden global to get the same lifecycle.
#[derive(Default)]
pub struct SurfaceRegistry {
    next_id: u64,
    surfaces: HashMap<u64, SurfaceEntry>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            surfaces: HashMap::new(),
        }
    }

    /// Register a new surface, returning a handle for subsequent calls.
    pub fn register(&mut self) -> SurfaceId {
        let id = self.next_id;
        self.next_id += 1;
        self.surfaces.insert(id, SurfaceEntry::new());
        SurfaceId(id)
    }

    /// Drop all frame-tracking state for a surface. A no-op if already
    /// unregistered (or never registered).
    pub fn unregister(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface.0);
    }

    /// Allocate the next frame ID for `surface` and record its creation
    /// timestamp. Returns 0 if the surface is not registered.
    pub fn generate_frame_id(&mut self, surface: SurfaceId, now_us: u64) -> u64 {
        let _guard = ReentranceGuard::enter();

        let Some(entry) = self.surfaces.get_mut(&surface.0) else {
            tracing::warn!(surface = surface.0, "generate_frame_id on unregistered surface");
            return 0;
        };

        entry.frame_id_counter += 1;
        let frame_id = entry.frame_id_counter;

        let needed = frame_id as usize + 1;
        if needed > entry.frame_timestamps.len() {
            let mut new_capacity = entry.frame_timestamps.len().max(1);
            while new_capacity < needed {
                new_capacity *= 2;
            }
            entry.frame_timestamps.resize(new_capacity, 0);
        }
        entry.frame_timestamps[frame_id as usize] = now_us;

        frame_id
    }

    /// Report that `frame_id` on `surface` has been presented at `ts_us`.
    /// Computes latency against the recorded creation timestamp, clears the
    /// slot, and returns the result for the caller to forward to the metrics
    /// collector and to the input proxy's `reconcile`.
    pub fn notify_frame_presented(
        &mut self,
        surface: SurfaceId,
        frame_id: u64,
        ts_us: u64,
    ) -> FramePresented {
        let _guard = ReentranceGuard::enter();

        let Some(entry) = self.surfaces.get_mut(&surface.0) else {
            tracing::warn!(surface = surface.0, frame_id, "frame presented on unregistered surface");
            return FramePresented {
                latency_ms: 0,
                dropped: true,
            };
        };

        match entry.frame_timestamps.get(frame_id as usize).copied() {
            Some(created_us) if created_us > 0 => {
                entry.frame_timestamps[frame_id as usize] = 0;
                let latency_ms = ((ts_us.saturating_sub(created_us)) / 1000) as u32;
                FramePresented {
                    latency_ms,
                    dropped: false,
                }
            }
            _ => {
                tracing::debug!(frame_id, "frame presented with no matching record, dropped");
                FramePresented {
                    latency_ms: 0,
                    dropped: true,
                }
            }
        }
    }
}
